//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Draw every component into one frame string
//!
//! The frame is printed in a single write so Zellij never shows a half-drawn
//! pane.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the plugin UI into a string of ANSI-styled output.
///
/// # Example
///
/// ```rust
/// use poemseek::app::AppState;
/// use poemseek::ui::{render_to_string, Theme};
///
/// let state = AppState::new(Theme::default());
/// let frame = render_to_string(&state, 24, 80);
/// assert!(frame.contains("word(s)"));
/// ```
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = String::new();
    components::render_layout(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame
}
