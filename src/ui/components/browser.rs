//! Previous/next navigation bar.

use super::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BrowserInfo;

/// Renders `‹ 2 of 5 ›`; an arrow is blanked when that direction is closed.
pub fn render_browser(out: &mut String, row: usize, browser: &BrowserInfo, theme: &Theme, cols: usize) -> usize {
    let previous = if browser.can_go_previous { '‹' } else { ' ' };
    let next = if browser.can_go_next { '›' } else { ' ' };
    let text = format!("{previous} {} {next}", browser.position);
    render_centered(out, row, &text, &Theme::fg(&theme.colors.nav_fg), cols);
    row + 1
}
