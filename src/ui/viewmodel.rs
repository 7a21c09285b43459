//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated text, highlight ranges, and which optional sections to show.
//!
//! # Example
//!
//! ```rust
//! use poemseek::ui::viewmodel::{DisplayLine, PoemPanel};
//!
//! let panel = PoemPanel {
//!     title: "Hope".to_string(),
//!     author: "Emily Dickinson".to_string(),
//!     lines: vec![DisplayLine {
//!         text: "Hope is the thing with feathers".to_string(),
//!         highlight_ranges: vec![(0, 4)],
//!     }],
//!     hidden_lines: 0,
//! };
//! assert_eq!(panel.lines.len(), 1);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,

    /// Searching indicator or error line; `None` shows nothing.
    pub status: Option<StatusLine>,

    /// The poem under the cursor.
    pub poem: Option<PoemPanel>,

    /// Previous/next chrome, present only with more than one result.
    pub browser: Option<BrowserInfo>,

    /// Shown when a committed term produced nothing.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Raw input text.
    pub query: String,
    /// Input is empty and the placeholder should be drawn instead.
    pub is_placeholder: bool,
}

/// One-line status under the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Searching(String),
    Error(String),
}

/// The poem being browsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemPanel {
    pub title: String,
    pub author: String,
    pub lines: Vec<DisplayLine>,

    /// Lines cut off because the pane is too short.
    pub hidden_lines: usize,
}

/// A single poem line with search term matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,

    /// Character ranges to highlight.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Previous/next navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserInfo {
    /// One-based position, e.g. `"2 of 5"`.
    pub position: String,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
