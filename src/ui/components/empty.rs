//! Empty state component renderer.

use super::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the "nothing found" message and its subtitle on two rows.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered(out, row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    render_centered(out, row + 1, &empty.subtitle, &Theme::fg(&theme.colors.text_dim), cols);
    row + 2
}
