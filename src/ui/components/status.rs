//! Status line renderer: the searching indicator or the error message.

use super::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

pub fn render_status(out: &mut String, row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    match status {
        Some(StatusLine::Searching(text)) => {
            let style = format!("{}{}", Theme::italic(), Theme::fg(&theme.colors.status_fg));
            render_centered(out, row, text, &style, cols);
        }
        Some(StatusLine::Error(text)) => {
            render_centered(out, row, text, &Theme::fg(&theme.colors.error_fg), cols);
        }
        None => {}
    }
    row + 1
}
