//! Cursor over the current result set.
//!
//! [`PoemBrowser`] owns the only copy of the result set and a clamped cursor.
//! Navigation past either end is a no-op; nothing here can panic or go
//! negative.

use crate::domain::{Poem, ResultSet};

/// Holds the ordered result list and the index of the displayed poem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoemBrowser {
    poems: ResultSet,
    cursor: usize,
}

impl PoemBrowser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poems: Vec::new(),
            cursor: 0,
        }
    }

    /// Replaces the result set and moves the cursor to the first poem.
    pub fn reset(&mut self, poems: ResultSet) {
        self.poems = poems;
        self.cursor = 0;
    }

    /// Moves to the previous poem unless already at the first.
    pub fn previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves to the next poem unless already at the last.
    pub fn next(&mut self) {
        if self.cursor + 1 < self.poems.len() {
            self.cursor += 1;
        }
    }

    /// The poem under the cursor, or `None` for an empty result set.
    #[must_use]
    pub fn current(&self) -> Option<&Poem> {
        self.poems.get(self.cursor)
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.poems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }

    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.poems.len()
    }

    /// Navigation chrome only makes sense with more than one poem.
    #[must_use]
    pub fn has_navigation(&self) -> bool {
        self.poems.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn poems(n: usize) -> Vec<Poem> {
        (0..n)
            .map(|i| Poem::new(format!("Poem {i}"), "Anon", vec![format!("line {i}")]))
            .collect()
    }

    #[test]
    fn empty_browser_has_no_current_poem() {
        let mut browser = PoemBrowser::new();
        browser.next();
        browser.previous();
        assert_eq!(browser.cursor(), 0);
        assert!(browser.current().is_none());
        assert!(!browser.has_navigation());
    }

    #[test]
    fn next_clamps_at_last_index() {
        let mut browser = PoemBrowser::new();
        browser.reset(poems(3));
        browser.next();
        browser.next();
        assert_eq!(browser.cursor(), 2);
        assert!(!browser.can_go_next());
        browser.next();
        assert_eq!(browser.cursor(), 2);
        assert_eq!(browser.current().map(|p| p.title.as_str()), Some("Poem 2"));
    }

    #[test]
    fn previous_clamps_at_zero() {
        let mut browser = PoemBrowser::new();
        browser.reset(poems(2));
        browser.previous();
        assert_eq!(browser.cursor(), 0);
        assert!(!browser.can_go_previous());
        assert!(browser.can_go_next());
    }

    #[test]
    fn reset_returns_cursor_to_start() {
        let mut browser = PoemBrowser::new();
        browser.reset(poems(4));
        browser.next();
        browser.next();
        browser.reset(poems(1));
        assert_eq!(browser.cursor(), 0);
        assert!(!browser.has_navigation());
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(len in 0usize..8, moves in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut browser = PoemBrowser::new();
            browser.reset(poems(len));
            for forward in moves {
                let before = browser.cursor();
                if forward {
                    browser.next();
                    if len == 0 || before == len - 1 {
                        prop_assert_eq!(browser.cursor(), before);
                    }
                } else {
                    browser.previous();
                    if before == 0 {
                        prop_assert_eq!(browser.cursor(), 0);
                    }
                }
                prop_assert!(browser.cursor() < len.max(1));
            }
        }
    }
}
