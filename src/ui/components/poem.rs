//! Poem panel renderer.
//!
//! Title and author are centered; lines are left-aligned under a small indent
//! with search term matches highlighted. When lines were cut off a dim
//! "more lines" hint takes the last row.

use super::render_centered;
use crate::ui::helpers::{display_width, position_cursor, render_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PoemPanel;

const LINE_INDENT: usize = 2;

pub fn render_poem(out: &mut String, row: usize, poem: &PoemPanel, theme: &Theme, cols: usize) -> usize {
    let title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.title_fg));
    render_centered(out, row, &poem.title, &title_style, cols);

    let author_style = format!("{}{}", Theme::italic(), Theme::fg(&theme.colors.author_fg));
    render_centered(out, row + 1, &format!("by {}", poem.author), &author_style, cols);

    let mut current_row = row + 3;
    let width = cols.saturating_sub(LINE_INDENT);
    for line in &poem.lines {
        position_cursor(out, current_row, 1);
        out.push_str(&" ".repeat(LINE_INDENT));
        render_highlighted_text(out, &line.text, &line.highlight_ranges, theme, &theme.colors.text_normal);
        out.push_str(&" ".repeat(width.saturating_sub(display_width(&line.text))));
        out.push_str(Theme::reset());
        current_row += 1;
    }

    if poem.hidden_lines > 0 {
        let hint = format!("... {} more lines", poem.hidden_lines);
        render_centered(out, current_row, &hint, &Theme::fg(&theme.colors.text_dim), cols);
        current_row += 1;
    }

    current_row
}
