//! Rate-limits raw input into committed search terms.
//!
//! The debouncer is a pure state machine with an injected clock: callers pass
//! the current time in milliseconds to [`SearchInputDebouncer::on_input`] and
//! [`SearchInputDebouncer::poll`]. The plugin shell turns every scheduled delay
//! into a Zellij timer and polls when the timer fires, so this type never
//! touches the host runtime and never triggers a lookup on its own.
//!
//! # Commit rules
//!
//! - A value commits once `quiet_ms` have passed since the *last* input.
//! - Non-empty values shorter than `min_length` characters never commit.
//! - Clearing to empty commits immediately.
//! - A value equal to the last committed one does not commit again.

/// Default quiet period after the last keystroke.
pub const DEFAULT_QUIET_MS: u64 = 800;

/// Default minimum number of characters for a non-empty term.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Result of feeding one raw input event to the debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceDecision {
    /// The value must be committed right away (only ever the empty term).
    Commit(String),
    /// A commit may happen after `delay_ms`; the caller should poll then.
    Scheduled {
        /// Milliseconds until the quiet period ends.
        delay_ms: u64,
    },
    /// Nothing to do.
    Ignored,
}

/// Result of polling the debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new committed term.
    Commit(String),
    /// Input is pending but still inside its quiet period.
    Waiting {
        /// Milliseconds until the quiet period ends.
        remaining_ms: u64,
    },
    /// Nothing pending, or the pending value was not committable.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    value: String,
    at_ms: u64,
}

/// Converts keystroke-level input into committed search terms.
#[derive(Debug, Clone)]
pub struct SearchInputDebouncer {
    quiet_ms: u64,
    min_length: usize,
    pending: Option<Pending>,
    last_committed: String,
}

impl Default for SearchInputDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS, DEFAULT_MIN_LENGTH)
    }
}

impl SearchInputDebouncer {
    #[must_use]
    pub const fn new(quiet_ms: u64, min_length: usize) -> Self {
        Self {
            quiet_ms,
            min_length,
            pending: None,
            last_committed: String::new(),
        }
    }

    /// Quiet period in milliseconds.
    #[must_use]
    pub const fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// The most recently committed term (empty before the first commit).
    #[must_use]
    pub fn last_committed(&self) -> &str {
        &self.last_committed
    }

    /// Whether a value is waiting for its quiet period to end.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a raw text change.
    ///
    /// Surrounding whitespace is trimmed; whitespace-only input counts as a
    /// clear.
    pub fn on_input(&mut self, raw: &str, now_ms: u64) -> DebounceDecision {
        let value = raw.trim();

        if value.is_empty() {
            self.pending = None;
            if self.last_committed.is_empty() {
                return DebounceDecision::Ignored;
            }
            self.last_committed.clear();
            tracing::debug!("search cleared, committing empty term");
            return DebounceDecision::Commit(String::new());
        }

        self.pending = Some(Pending {
            value: value.to_string(),
            at_ms: now_ms,
        });
        DebounceDecision::Scheduled {
            delay_ms: self.quiet_ms,
        }
    }

    /// Commits the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> PollOutcome {
        let Some(pending) = &self.pending else {
            return PollOutcome::Idle;
        };

        let elapsed = now_ms.saturating_sub(pending.at_ms);
        if elapsed < self.quiet_ms {
            return PollOutcome::Waiting {
                remaining_ms: self.quiet_ms - elapsed,
            };
        }

        let Some(Pending { value, .. }) = self.pending.take() else {
            return PollOutcome::Idle;
        };

        if value.chars().count() < self.min_length {
            tracing::debug!(value_len = value.chars().count(), min_length = self.min_length, "input below minimum length");
            return PollOutcome::Idle;
        }
        if value == self.last_committed {
            tracing::trace!("input unchanged since last commit");
            return PollOutcome::Idle;
        }

        self.last_committed.clone_from(&value);
        PollOutcome::Commit(value)
    }

    /// Drops any pending value. Used on teardown.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
