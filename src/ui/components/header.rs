//! Header component renderer.

use super::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the tagline centered and bold; returns the next row.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mut style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }
    render_centered(out, row, &header.title, &style, cols);
    row + 1
}
