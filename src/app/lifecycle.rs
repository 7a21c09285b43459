//! Fetch lifecycle state machine.
//!
//! Tracks the single lookup whose completion is allowed to change state. Every
//! lookup gets a fresh [`RequestId`]; starting a new one or clearing the term
//! supersedes the previous id, and any completion carrying a superseded id is
//! dropped without a transition. Completions are keyed by id, never by arrival
//! order, so out-of-order responses cannot leak an older outcome into state.
//!
//! ```text
//!            begin(term)               complete(current, Ok)
//!   Idle ──────────────▶ Requesting ─────────────────────────▶ Succeeded
//!    ▲                    │  ▲   │     complete(current, Err)
//!    │ clear()/teardown() │  │   └───────────────────────────▶ Failed
//!    └────────────────────┘  └── begin(term) from any state ──┘
//! ```

use crate::domain::{RequestId, ResultSet, SearchError};

/// Where the lifecycle currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleStatus {
    /// No active search.
    #[default]
    Idle,
    /// Waiting on the lookup identified by `id`.
    Requesting { id: RequestId, term: String },
    /// The last lookup returned `count` poems (held by the browser).
    Succeeded { term: String, count: usize },
    /// The last lookup failed with a user-visible `message`.
    Failed { term: String, message: String },
}

/// Returned by [`FetchLifecycle::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeginOutcome {
    /// Id of the lookup to issue.
    pub id: RequestId,
    /// In-flight lookup that must be cancelled, if any.
    pub superseded: Option<RequestId>,
}

/// Applied outcome of the current lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Succeeded(ResultSet),
    Failed(String),
}

/// One outstanding lookup at a time, with stale-response suppression.
#[derive(Debug, Clone, Default)]
pub struct FetchLifecycle {
    status: LifecycleStatus,
    last_id: RequestId,
}

impl FetchLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn status(&self) -> &LifecycleStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_requesting(&self) -> bool {
        matches!(self.status, LifecycleStatus::Requesting { .. })
    }

    /// Id of the in-flight lookup, if any.
    #[must_use]
    pub const fn current_request(&self) -> Option<RequestId> {
        match self.status {
            LifecycleStatus::Requesting { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Starts a lookup for a non-empty committed term.
    pub fn begin(&mut self, term: &str) -> BeginOutcome {
        let superseded = self.current_request();
        let id = self.last_id.next();
        self.last_id = id;

        if let Some(old) = superseded {
            tracing::debug!(superseded = %old, request = %id, "superseding in-flight lookup");
        }

        self.status = LifecycleStatus::Requesting {
            id,
            term: term.to_string(),
        };
        BeginOutcome { id, superseded }
    }

    /// Returns to `Idle`, handing back the in-flight id to cancel.
    pub fn clear(&mut self) -> Option<RequestId> {
        let cancelled = self.current_request();
        self.status = LifecycleStatus::Idle;
        cancelled
    }

    /// Same transition as [`clear`](Self::clear); named for the unmount path.
    pub fn teardown(&mut self) -> Option<RequestId> {
        self.clear()
    }

    /// Applies a lookup result if `id` is the current request.
    ///
    /// Returns `None`, leaving the state untouched, for stale or unknown ids.
    pub fn complete(&mut self, id: RequestId, result: Result<ResultSet, SearchError>) -> Option<Completion> {
        let term = match &self.status {
            LifecycleStatus::Requesting { id: current, term } if *current == id => term.clone(),
            _ => {
                tracing::debug!(request = %id, current = ?self.current_request(), "dropping stale completion");
                return None;
            }
        };

        match result {
            Ok(poems) => {
                tracing::debug!(request = %id, count = poems.len(), "lookup succeeded");
                self.status = LifecycleStatus::Succeeded {
                    term,
                    count: poems.len(),
                };
                Some(Completion::Succeeded(poems))
            }
            Err(err) => {
                let message = err.to_string();
                tracing::debug!(request = %id, error = %message, "lookup failed");
                self.status = LifecycleStatus::Failed {
                    term,
                    message: message.clone(),
                };
                Some(Completion::Failed(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Poem;

    fn poem() -> Poem {
        Poem::new("Hope", "Emily Dickinson", vec!["\"Hope\" is the thing with feathers -"])
    }

    #[test]
    fn starts_idle() {
        let lifecycle = FetchLifecycle::new();
        assert_eq!(lifecycle.status(), &LifecycleStatus::Idle);
        assert!(!lifecycle.is_requesting());
    }

    #[test]
    fn begin_supersedes_in_flight_request() {
        let mut lifecycle = FetchLifecycle::new();
        let first = lifecycle.begin("a");
        assert_eq!(first.superseded, None);

        let second = lifecycle.begin("b");
        assert_eq!(second.superseded, Some(first.id));
        assert!(second.id > first.id);
    }

    #[test]
    fn begin_after_completion_supersedes_nothing() {
        let mut lifecycle = FetchLifecycle::new();
        let first = lifecycle.begin("hope");
        lifecycle.complete(first.id, Ok(vec![poem()]));
        assert_eq!(lifecycle.begin("love").superseded, None);
    }

    #[test]
    fn stale_completion_is_dropped_in_either_order() {
        let mut lifecycle = FetchLifecycle::new();
        let r1 = lifecycle.begin("a");
        let r2 = lifecycle.begin("b");

        assert_eq!(lifecycle.complete(r1.id, Ok(vec![poem()])), None);
        assert_eq!(
            lifecycle.status(),
            &LifecycleStatus::Requesting { id: r2.id, term: "b".to_string() }
        );

        assert_eq!(lifecycle.complete(r2.id, Err(SearchError::NotFound)), Some(Completion::Failed("no poems for this search term".to_string())));
        assert_eq!(lifecycle.complete(r1.id, Ok(vec![poem()])), None);
        assert!(matches!(lifecycle.status(), LifecycleStatus::Failed { term, .. } if term == "b"));
    }

    #[test]
    fn success_records_term_and_count() {
        let mut lifecycle = FetchLifecycle::new();
        let r = lifecycle.begin("hope");
        let completion = lifecycle.complete(r.id, Ok(vec![poem(), poem()]));
        assert_eq!(completion, Some(Completion::Succeeded(vec![poem(), poem()])));
        assert_eq!(lifecycle.status(), &LifecycleStatus::Succeeded { term: "hope".to_string(), count: 2 });
    }

    #[test]
    fn transport_error_message_is_kept() {
        let mut lifecycle = FetchLifecycle::new();
        let r = lifecycle.begin("hope");
        lifecycle.complete(r.id, Err(SearchError::transport("HTTP 500: boom")));
        assert_eq!(
            lifecycle.status(),
            &LifecycleStatus::Failed { term: "hope".to_string(), message: "HTTP 500: boom".to_string() }
        );
    }

    #[test]
    fn clear_cancels_and_suppresses_late_result() {
        let mut lifecycle = FetchLifecycle::new();
        let r = lifecycle.begin("hope");
        assert_eq!(lifecycle.clear(), Some(r.id));
        assert_eq!(lifecycle.complete(r.id, Ok(vec![poem()])), None);
        assert_eq!(lifecycle.status(), &LifecycleStatus::Idle);
        assert_eq!(lifecycle.teardown(), None);
    }
}
