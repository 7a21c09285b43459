//! Footer component renderer.

use super::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders keybinding hints centered in dim text; returns the next row.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    render_centered(out, row, &footer.keybindings, &Theme::fg(&theme.colors.text_dim), cols);
    row + 1
}
