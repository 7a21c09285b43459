//! Event handling and state transition logic.
//!
//! [`handle_event`] is the transition function `(AppState, Event) -> AppState`
//! plus the side effects to perform. It is synchronous and never talks to the
//! host: timers, web requests and pane management come back out as
//! [`Action`]s, and their results come back in as new events.
//!
//! # Event Types
//!
//! - **Input**: `SearchTermChanged`, `Char`, `Backspace`, `ClearInput`, `Escape`
//! - **Navigation**: `RequestPrevious`, `RequestNext`
//! - **Runtime**: `DebounceElapsed`, `SearchCompleted`, `Teardown`
//!
//! # Example
//!
//! ```rust
//! use poemseek::app::{handle_event, Action, AppState, Event};
//! use poemseek::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::SearchTermChanged("hope".into()), 0);
//! assert_eq!(actions, vec![Action::ScheduleDebounce { delay_ms: 800 }]);
//!
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed, 800);
//! assert!(matches!(actions.as_slice(), [Action::IssueSearch { term, .. }] if term == "hope"));
//! ```

use super::debouncer::{DebounceDecision, PollOutcome};
use super::lifecycle::Completion;
use crate::app::{Action, AppState};
use crate::domain::{RequestId, ResultSet, SearchError};

/// Events triggered by user input or the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Replaces the whole search box contents.
    SearchTermChanged(String),
    /// Appends a character to the search box.
    Char(char),
    /// Removes the last character from the search box.
    Backspace,
    /// Empties the search box.
    ClearInput,
    /// Clears the search box, or closes the pane if it is already empty.
    Escape,
    /// Shows the previous poem.
    RequestPrevious,
    /// Shows the next poem.
    RequestNext,
    /// A debounce timer fired.
    DebounceElapsed,
    /// Lookup `id` finished.
    SearchCompleted {
        id: RequestId,
        result: Result<ResultSet, SearchError>,
    },
    /// The pane is going away.
    Teardown,
}

/// User-originated subset of [`Event`].
///
/// This is all the presentation layer may dispatch; runtime events enter only
/// through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SearchTermChanged(String),
    Char(char),
    Backspace,
    ClearInput,
    Escape,
    RequestPrevious,
    RequestNext,
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::SearchTermChanged(raw) => Self::SearchTermChanged(raw),
            Intent::Char(c) => Self::Char(c),
            Intent::Backspace => Self::Backspace,
            Intent::ClearInput => Self::ClearInput,
            Intent::Escape => Self::Escape,
            Intent::RequestPrevious => Self::RequestPrevious,
            Intent::RequestNext => Self::RequestNext,
        }
    }
}

/// Processes an event at time `now_ms`, mutates state, and returns whether to
/// re-render plus the actions to execute in order.
pub fn handle_event(state: &mut AppState, event: &Event, now_ms: u64) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchTermChanged(raw) => {
            state.input.clone_from(raw);
            on_input_changed(state, now_ms)
        }
        Event::Char(c) => {
            state.input.push(*c);
            tracing::trace!(input = %state.input, "search input updated");
            on_input_changed(state, now_ms)
        }
        Event::Backspace => {
            if state.input.pop().is_none() {
                return (false, vec![]);
            }
            on_input_changed(state, now_ms)
        }
        Event::ClearInput => clear_input(state, now_ms),
        Event::Escape => {
            if state.input.is_empty() {
                tracing::debug!("escape on empty input, closing");
                (false, vec![Action::CloseFocus])
            } else {
                clear_input(state, now_ms)
            }
        }
        Event::RequestPrevious | Event::RequestNext => {
            if state.lifecycle.is_requesting() {
                tracing::debug!("navigation ignored while a lookup is in flight");
                return (false, vec![]);
            }
            let before = state.browser.cursor();
            if matches!(event, Event::RequestPrevious) {
                state.browser.previous();
            } else {
                state.browser.next();
            }
            (state.browser.cursor() != before, vec![])
        }
        Event::DebounceElapsed => match state.debouncer.poll(now_ms) {
            PollOutcome::Commit(term) => commit_term(state, term),
            PollOutcome::Waiting { remaining_ms } => (false, vec![Action::RearmDebounce { delay_ms: remaining_ms }]),
            PollOutcome::Idle => (false, vec![]),
        },
        Event::SearchCompleted { id, result } => match state.lifecycle.complete(*id, result.clone()) {
            Some(Completion::Succeeded(poems)) => {
                state.browser.reset(poems);
                state.error_message = None;
                (true, vec![])
            }
            Some(Completion::Failed(message)) => {
                state.browser.reset(vec![]);
                state.error_message = Some(message);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        Event::Teardown => {
            state.debouncer.cancel();
            let actions = state
                .lifecycle
                .teardown()
                .map(|id| Action::CancelSearch { id })
                .into_iter()
                .collect();
            (false, actions)
        }
    }
}

fn clear_input(state: &mut AppState, now_ms: u64) -> (bool, Vec<Action>) {
    if state.input.is_empty() {
        return (false, vec![]);
    }
    state.input.clear();
    on_input_changed(state, now_ms)
}

fn on_input_changed(state: &mut AppState, now_ms: u64) -> (bool, Vec<Action>) {
    match state.debouncer.on_input(&state.input, now_ms) {
        DebounceDecision::Commit(term) => commit_term(state, term),
        DebounceDecision::Scheduled { delay_ms } => (true, vec![Action::ScheduleDebounce { delay_ms }]),
        DebounceDecision::Ignored => (true, vec![]),
    }
}

/// Reconciles a newly committed term with the lifecycle and the browser.
fn commit_term(state: &mut AppState, term: String) -> (bool, Vec<Action>) {
    tracing::debug!(term = %term, "search term committed");
    let mut actions = vec![];

    if term.is_empty() {
        if let Some(id) = state.lifecycle.clear() {
            actions.push(Action::CancelSearch { id });
        }
        state.browser.reset(vec![]);
        state.error_message = None;
        state.search_term = term;
        return (true, actions);
    }

    let begin = state.lifecycle.begin(&term);
    if let Some(id) = begin.superseded {
        actions.push(Action::CancelSearch { id });
    }
    state.error_message = None;
    actions.push(Action::IssueSearch {
        id: begin.id,
        term: term.clone(),
    });
    state.search_term = term;
    (true, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Poem;
    use crate::app::LifecycleStatus;
    use crate::ui::Theme;

    fn poems(n: usize) -> Vec<Poem> {
        (0..n).map(|i| Poem::new(format!("P{i}"), "Anon", vec!["x"])).collect()
    }

    fn committed(state: &mut AppState, term: &str, at: u64) -> RequestId {
        handle_event(state, &Event::SearchTermChanged(term.to_string()), at);
        let (_, actions) = handle_event(state, &Event::DebounceElapsed, at + 800);
        actions
            .iter()
            .find_map(|a| match a {
                Action::IssueSearch { id, .. } => Some(*id),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn typing_schedules_debounce_without_request() {
        let mut state = AppState::new(Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Char('h'), 0);
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleDebounce { delay_ms: 800 }]);
        assert_eq!(state.input(), "h");
        assert!(!state.view().is_searching);
    }

    #[test]
    fn early_tick_rearms_for_the_remainder() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::Char('h'), 0);
        handle_event(&mut state, &Event::Char('o'), 500);
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed, 800);
        assert_eq!(actions, vec![Action::RearmDebounce { delay_ms: 500 }]);
    }

    #[test]
    fn superseding_term_cancels_previous_request() {
        let mut state = AppState::new(Theme::default());
        let first = committed(&mut state, "hope", 0);
        handle_event(&mut state, &Event::SearchTermChanged("love".into()), 1000);
        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed, 1800);
        assert_eq!(actions[0], Action::CancelSearch { id: first });
        assert!(matches!(&actions[1], Action::IssueSearch { term, .. } if term == "love"));
    }

    #[test]
    fn clearing_cancels_and_returns_to_idle() {
        let mut state = AppState::new(Theme::default());
        let id = committed(&mut state, "hope", 0);
        let (_, actions) = handle_event(&mut state, &Event::ClearInput, 900);
        assert_eq!(actions, vec![Action::CancelSearch { id }]);
        assert_eq!(state.lifecycle_status(), &LifecycleStatus::Idle);
        assert_eq!(state.search_term(), "");
    }

    #[test]
    fn failure_clears_results_and_sets_message() {
        let mut state = AppState::new(Theme::default());
        let id = committed(&mut state, "hope", 0);
        handle_event(&mut state, &Event::SearchCompleted { id, result: Ok(poems(3)) }, 900);
        handle_event(&mut state, &Event::RequestNext, 950);

        let id = committed(&mut state, "zzzzz", 1000);
        handle_event(&mut state, &Event::SearchCompleted { id, result: Err(SearchError::NotFound) }, 2000);

        let view = state.view();
        assert_eq!(view.result_count, 0);
        assert_eq!(view.cursor_position, 0);
        assert_eq!(view.error_message, Some("no poems for this search term"));
    }

    #[test]
    fn navigation_is_blocked_while_requesting() {
        let mut state = AppState::new(Theme::default());
        let id = committed(&mut state, "hope", 0);
        handle_event(&mut state, &Event::SearchCompleted { id, result: Ok(poems(3)) }, 900);
        committed(&mut state, "love", 1000);

        let (render, _) = handle_event(&mut state, &Event::RequestNext, 1900);
        assert!(!render);
        assert_eq!(state.view().cursor_position, 0);
        assert!(!state.view().can_go_next);
    }

    #[test]
    fn escape_closes_only_when_input_is_empty() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::Char('h'), 0);
        let (_, actions) = handle_event(&mut state, &Event::Escape, 10);
        assert!(actions.is_empty());
        assert_eq!(state.input(), "");
        let (_, actions) = handle_event(&mut state, &Event::Escape, 20);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn backspace_on_empty_input_does_nothing() {
        let mut state = AppState::new(Theme::default());
        assert_eq!(handle_event(&mut state, &Event::Backspace, 0), (false, vec![]));
    }

    #[test]
    fn teardown_cancels_in_flight_lookup() {
        let mut state = AppState::new(Theme::default());
        let id = committed(&mut state, "hope", 0);
        handle_event(&mut state, &Event::Char('s'), 900);
        let (_, actions) = handle_event(&mut state, &Event::Teardown, 1000);
        assert_eq!(actions, vec![Action::CancelSearch { id }]);
        assert_eq!(handle_event(&mut state, &Event::DebounceElapsed, 5000), (false, vec![]));
    }
}
