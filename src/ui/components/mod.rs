//! Composable UI component renderers.
//!
//! Each component draws one part of the pane into the frame buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Tagline
//! - [`search`]: Search input box
//! - [`status`]: Searching indicator or error line
//! - [`browser`]: Previous/next position
//! - [`poem`]: Title, author and highlighted lines
//! - [`empty`]: No-results message
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status]
//! [‹ N of M ›]
//! [Poem title / author / blank / lines]  or  [Empty state]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod browser;
mod empty;
mod footer;
mod header;
mod poem;
mod search;
mod status;

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use browser::render_browser;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use poem::render_poem;
use search::render_search_bar;
use status::render_status;

/// Draws a horizontal rule; returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Draws `text` centered on `row` in `style`, padded to the full width.
fn render_centered(out: &mut String, row: usize, text: &str, style: &str, cols: usize) {
    let text_len = display_width(text).min(cols);
    let padding = cols.saturating_sub(text_len) / 2;
    let visible: String = text.chars().take(text_len).collect();

    position_cursor(out, row, 1);
    out.push_str(style);
    out.push_str(&" ".repeat(padding));
    out.push_str(&visible);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + text_len)));
    out.push_str(Theme::reset());
}

/// Renders the full layout into `out`.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row = render_status(out, current_row, vm.status.as_ref(), theme, cols);

    if let Some(browser) = &vm.browser {
        render_browser(out, current_row, browser, theme, cols);
    }
    current_row += 1;

    if let Some(poem) = &vm.poem {
        render_poem(out, current_row, poem, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row, empty, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_start, &vm.footer, theme, cols);
}
