//! Application state and view model computation.
//!
//! [`AppState`] is the single owned container for everything the plugin knows:
//! the raw input text, the committed term, the debouncer, the fetch lifecycle,
//! the result browser and the error line. Only [`handle_event`](super::handle_event)
//! mutates it; the presentation layer reads it through [`AppState::view`] and
//! [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use poemseek::app::AppState;
//! use poemseek::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let view = state.view();
//! assert!(!view.is_searching);
//! assert_eq!(view.result_count, 0);
//! assert!(view.current_poem.is_none());
//! ```

use super::browser::PoemBrowser;
use super::debouncer::SearchInputDebouncer;
use super::lifecycle::{FetchLifecycle, LifecycleStatus};
use crate::domain::Poem;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BrowserInfo, DisplayLine, EmptyState, FooterInfo, HeaderInfo, PoemPanel, SearchBarInfo, StatusLine, UIViewModel,
};

/// Rows taken by everything except the poem lines.
///
/// Blank, header, border, three-line search box, status, navigation, title,
/// author, spacer, bottom border, footer, and the unused last row.
const CHROME_ROWS: usize = 14;

const TAGLINE: &str = "Enter a word or two and we'll find you some poems";
const SEARCHING_TEXT: &str = "Finding you poems...";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Raw contents of the search box.
    pub(crate) input: String,

    /// Most recently committed search term; empty means no active search.
    pub(crate) search_term: String,

    pub(crate) debouncer: SearchInputDebouncer,
    pub(crate) lifecycle: FetchLifecycle,
    pub(crate) browser: PoemBrowser,

    /// User-visible failure message of the last lookup.
    pub(crate) error_message: Option<String>,

    /// Color scheme for rendering.
    pub theme: Theme,
}

/// Read-only projection of [`AppState`] for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView<'a> {
    pub is_searching: bool,
    pub error_message: Option<&'a str>,
    pub current_poem: Option<&'a Poem>,
    pub result_count: usize,
    pub cursor_position: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Whether previous/next chrome should be shown at all.
    pub show_browser: bool,
    /// A committed term ended with no poems, whether not found or failed.
    pub show_no_results: bool,
}

impl AppState {
    /// Creates an empty state with default debounce settings.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_debouncer(theme, SearchInputDebouncer::default())
    }

    /// Creates an empty state around a configured debouncer.
    #[must_use]
    pub fn with_debouncer(theme: Theme, debouncer: SearchInputDebouncer) -> Self {
        Self {
            input: String::new(),
            search_term: String::new(),
            debouncer,
            lifecycle: FetchLifecycle::new(),
            browser: PoemBrowser::new(),
            error_message: None,
            theme,
        }
    }

    /// Raw search box contents.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The committed search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub const fn lifecycle_status(&self) -> &LifecycleStatus {
        self.lifecycle.status()
    }

    /// Derives the fields the presentation layer is allowed to see.
    #[must_use]
    pub fn view(&self) -> SearchView<'_> {
        let is_searching = self.lifecycle.is_requesting();
        let result_count = self.browser.len();
        SearchView {
            is_searching,
            error_message: self.error_message.as_deref(),
            current_poem: self.browser.current(),
            result_count,
            cursor_position: self.browser.cursor(),
            can_go_previous: !is_searching && self.browser.can_go_previous(),
            can_go_next: !is_searching && self.browser.can_go_next(),
            show_browser: !is_searching && self.browser.has_navigation(),
            show_no_results: !is_searching && !self.search_term.is_empty() && result_count == 0,
        }
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let view = self.view();

        let status = if view.is_searching {
            Some(StatusLine::Searching(SEARCHING_TEXT.to_string()))
        } else {
            view.error_message.map(|message| StatusLine::Error(format!("Oh no: {message}.")))
        };

        let browser = view.show_browser.then(|| BrowserInfo {
            position: format!("{} of {}", view.cursor_position + 1, view.result_count),
            can_go_previous: view.can_go_previous,
            can_go_next: view.can_go_next,
        });

        let empty_state = view.show_no_results.then(|| EmptyState {
            message: "No Poems Found :(".to_string(),
            subtitle: "Try another word or two".to_string(),
        });

        let poem = view
            .current_poem
            .map(|poem| self.compute_poem_panel(poem, rows.saturating_sub(CHROME_ROWS), cols));

        UIViewModel {
            header: HeaderInfo {
                title: TAGLINE.to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.input.clone(),
                is_placeholder: self.input.is_empty(),
            },
            status,
            poem,
            browser,
            empty_state,
            footer: self.compute_footer(&view),
        }
    }

    /// Lays out the current poem into at most `available_rows` lines.
    fn compute_poem_panel(&self, poem: &Poem, available_rows: usize, cols: usize) -> PoemPanel {
        let total = poem.line_count();
        let visible = if total > available_rows {
            available_rows.saturating_sub(1)
        } else {
            total
        };

        let lines = poem.lines[..visible]
            .iter()
            .map(|line| {
                let text = truncate_chars(line, cols);
                let highlight_ranges = Self::compute_highlight_ranges(&text, &self.search_term);
                DisplayLine { text, highlight_ranges }
            })
            .collect();

        PoemPanel {
            title: truncate_chars(&poem.title, cols),
            author: truncate_chars(&poem.author, cols),
            lines,
            hidden_lines: total - visible,
        }
    }

    /// Character ranges of case-insensitive occurrences of `term` in `text`.
    ///
    /// Ranges are `(start, end)` character indices with exclusive end, in
    /// order and non-overlapping.
    fn compute_highlight_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
        if term.is_empty() {
            return vec![];
        }

        let haystack: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
        let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();

        // Lowercasing can expand a char; only highlight when indices still line up.
        if haystack.len() != text.chars().count() || needle.len() > haystack.len() {
            return vec![];
        }

        let mut ranges = Vec::new();
        let mut i = 0;
        while i + needle.len() <= haystack.len() {
            if haystack[i..i + needle.len()] == needle[..] {
                ranges.push((i, i + needle.len()));
                i += needle.len();
            } else {
                i += 1;
            }
        }
        ranges
    }

    fn compute_footer(&self, view: &SearchView<'_>) -> FooterInfo {
        let keybindings = if view.show_browser {
            "Type to search  ←/→ or Ctrl+p/n: browse  Ctrl+u: clear  Esc: clear/close"
        } else if self.input.is_empty() {
            "Type to search  Esc: close"
        } else {
            "Type to search  Ctrl+u: clear  Esc: clear/close"
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else if max < 3 {
        text.chars().take(max).collect()
    } else {
        let keep: String = text.chars().take(max - 3).collect();
        format!("{keep}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event};
    use crate::domain::{ResultSet, SearchError};

    #[test]
    fn highlight_finds_every_case_insensitive_occurrence() {
        let ranges = AppState::compute_highlight_ranges("Hope, and hope again", "hope");
        assert_eq!(ranges, vec![(0, 4), (10, 14)]);
    }

    #[test]
    fn highlight_uses_character_indices() {
        let ranges = AppState::compute_highlight_ranges("élan hope", "hope");
        assert_eq!(ranges, vec![(5, 9)]);
    }

    #[test]
    fn highlight_ignores_empty_term() {
        assert!(AppState::compute_highlight_ranges("hope", "").is_empty());
    }

    #[test]
    fn long_poems_are_cut_with_hidden_count() {
        let mut state = AppState::new(Theme::default());
        state.search_term = "line".to_string();
        let lines: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
        state.browser.reset(vec![Poem::new("Long", "Anon", lines)]);

        let vm = state.compute_viewmodel(24, 80);
        let panel = vm.poem.unwrap();
        assert_eq!(panel.lines.len(), 24 - CHROME_ROWS - 1);
        assert_eq!(panel.hidden_lines, 40 - panel.lines.len());
        assert_eq!(panel.lines[0].highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn idle_state_shows_placeholder_and_nothing_else() {
        let state = AppState::new(Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.search_bar.is_placeholder);
        assert!(vm.status.is_none());
        assert!(vm.poem.is_none());
        assert!(vm.browser.is_none());
        assert!(vm.empty_state.is_none());
    }

    fn complete_lookup(state: &mut AppState, term: &str, result: Result<ResultSet, SearchError>) {
        handle_event(state, &Event::SearchTermChanged(term.to_string()), 0);
        handle_event(state, &Event::DebounceElapsed, 800);
        let id = state.lifecycle.current_request().unwrap();
        handle_event(state, &Event::SearchCompleted { id, result }, 900);
    }

    #[test]
    fn not_found_shows_error_line_and_empty_state() {
        let mut state = AppState::new(Theme::default());
        complete_lookup(&mut state, "zzzzz", Err(SearchError::NotFound));

        assert!(state.view().show_no_results);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status, Some(StatusLine::Error("Oh no: no poems for this search term.".to_string())));
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No Poems Found :(".to_string()));
    }

    #[test]
    fn transport_failure_also_leaves_nothing_to_browse() {
        let mut state = AppState::new(Theme::default());
        complete_lookup(&mut state, "hope", Err(SearchError::transport("service returned an empty poem list")));
        assert!(state.view().show_no_results);
        assert!(state.compute_viewmodel(24, 80).poem.is_none());
    }

    #[test]
    fn found_poems_hide_empty_state() {
        let mut state = AppState::new(Theme::default());
        complete_lookup(&mut state, "hope", Ok(vec![Poem::new("Hope", "Emily Dickinson", vec!["hope"])]));
        assert!(!state.view().show_no_results);
        assert!(state.compute_viewmodel(24, 80).empty_state.is_none());
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_chars("abcdefghij", 6), "abc...");
        assert_eq!(truncate_chars("abc", 6), "abc");
        assert_eq!(truncate_chars("abcdef", 2), "ab");
        assert_eq!(truncate_chars("abcdef", 0), "");
        assert_eq!(truncate_chars("abcdef", 3), "...");
    }
}
