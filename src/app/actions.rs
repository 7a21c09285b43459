//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches the host. It mutates [`AppState`](super::AppState)
//! and returns a `Vec<Action>`; the controller executes them in order. This
//! keeps every state transition synchronous and testable while the actual
//! timers and web requests live at the edge.

use crate::domain::RequestId;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms a timer so the debouncer can be polled after `delay_ms`.
    ScheduleDebounce { delay_ms: u64 },

    /// Re-arms the debounce timer after a tick that fired too early.
    ///
    /// Skipped when another timer is still outstanding, since that one will
    /// poll again anyway.
    RearmDebounce { delay_ms: u64 },

    /// Sends lookup `id` for `term`.
    IssueSearch { id: RequestId, term: String },

    /// Cancels lookup `id`; its response, if any, must never be applied.
    CancelSearch { id: RequestId },

    /// Hides the plugin pane.
    CloseFocus,
}
