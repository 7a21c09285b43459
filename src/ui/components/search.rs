//! Search bar component renderer.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PLACEHOLDER: &str = "word(s)";

/// Renders the 3-line bordered search box; returns the next row.
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ hope▏       │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// Long queries keep their tail visible.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(out, row, 1);
    out.push_str(&format!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset()));

    let (text, style) = if search.is_placeholder {
        (format!(" {PLACEHOLDER}"), Theme::fg(&theme.colors.text_dim))
    } else {
        let room = inner_width.saturating_sub(2);
        let skip = display_width(&search.query).saturating_sub(room);
        let visible: String = search.query.chars().skip(skip).collect();
        (format!(" {visible}▏"), Theme::fg(&theme.colors.text_normal))
    };
    let padding = inner_width.saturating_sub(display_width(&text));

    position_cursor(out, row + 1, 1);
    out.push_str(&format!("{margin}{border}│{style}{text}{}{border}│{}", " ".repeat(padding), Theme::reset()));

    position_cursor(out, row + 2, 1);
    out.push_str(&format!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset()));

    row + 3
}
