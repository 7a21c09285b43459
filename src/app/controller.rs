//! Imperative shell around the event handler.
//!
//! [`AppController`] owns the state, the search client and a [`Host`]. Every
//! entry point turns its input into an [`Event`], runs it through
//! [`handle_event`], and executes the resulting actions against the host.

use super::handler::{handle_event, Event, Intent};
use super::state::{AppState, SearchView};
use super::Action;
use crate::client::{PoemSearchClient, SearchHandle, Transport};
use crate::domain::SearchError;
use std::collections::BTreeMap;

/// Runtime services the controller needs besides sending requests.
pub trait Host: Transport {
    /// Fires a timer tick after `seconds`.
    fn set_timeout(&mut self, seconds: f64);

    /// Hides the plugin pane.
    fn close(&mut self);

    /// Monotonic-enough wall clock in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Drives [`AppState`] from host events.
#[derive(Debug)]
pub struct AppController<H: Host> {
    state: AppState,
    client: PoemSearchClient,
    host: H,

    /// Handle of the lookup currently in flight.
    active: Option<SearchHandle>,

    /// Timers armed but not yet delivered.
    pending_timers: usize,
}

impl<H: Host> AppController<H> {
    #[must_use]
    pub const fn new(state: AppState, client: PoemSearchClient, host: H) -> Self {
        Self {
            state,
            client,
            host,
            active: None,
            pending_timers: 0,
        }
    }

    /// Applies a user intent; returns whether to re-render.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        self.run(Event::from(intent))
    }

    /// Handles a timer tick from the host.
    pub fn on_timer(&mut self) -> bool {
        self.pending_timers = self.pending_timers.saturating_sub(1);
        self.run(Event::DebounceElapsed)
    }

    /// Handles a finished web request.
    ///
    /// Responses to cancelled or superseded lookups are dropped here.
    pub fn on_web_response(&mut self, status: u16, body: &[u8], context: &BTreeMap<String, String>) -> bool {
        match self.client.resolve(status, body, context) {
            Ok(Some(completion)) => {
                if self.active.as_ref().is_some_and(|handle| handle.id == completion.id) {
                    self.active = None;
                }
                tracing::debug!(request = %completion.id, term = %completion.term, "lookup delivered");
                self.run(Event::SearchCompleted {
                    id: completion.id,
                    result: completion.result,
                })
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "web response without a usable lookup context");
                false
            }
        }
    }

    /// Cancels everything outstanding; later responses and ticks are no-ops.
    pub fn teardown(&mut self) {
        self.run(Event::Teardown);
        if let Some(handle) = self.active.take() {
            self.client.cancel(&handle);
        }
        self.client.cancel_all();
    }

    #[must_use]
    pub fn view(&self) -> SearchView<'_> {
        self.state.view()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The lookup currently in flight, if any.
    #[must_use]
    pub const fn active_search(&self) -> Option<&SearchHandle> {
        self.active.as_ref()
    }

    #[must_use]
    pub const fn client(&self) -> &PoemSearchClient {
        &self.client
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn run(&mut self, event: Event) -> bool {
        let mut queue = vec![event];
        let mut should_render = false;

        while let Some(event) = queue.pop() {
            let now_ms = self.host.now_ms();
            let (render, actions) = handle_event(&mut self.state, &event, now_ms);
            tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
            should_render |= render;

            for action in actions {
                if let Some(feedback) = self.execute(action) {
                    queue.push(feedback);
                }
            }
        }

        should_render
    }

    /// Executes one action; may produce an event to feed back in.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::ScheduleDebounce { delay_ms } => {
                self.arm_timer(delay_ms);
                None
            }
            Action::RearmDebounce { delay_ms } => {
                if self.pending_timers == 0 {
                    self.arm_timer(delay_ms);
                }
                None
            }
            Action::IssueSearch { id, term } => match self.client.search(id, &term, &mut self.host) {
                Ok(handle) => {
                    self.active = Some(handle);
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to issue poem lookup");
                    Some(Event::SearchCompleted {
                        id,
                        result: Err(SearchError::transport(e)),
                    })
                }
            },
            Action::CancelSearch { id } => {
                match self.active.take() {
                    Some(handle) if handle.id == id => {
                        self.client.cancel(&handle);
                    }
                    other => {
                        self.active = other;
                        self.client.cancel_id(id);
                    }
                }
                None
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                self.host.close();
                None
            }
        }
    }

    fn arm_timer(&mut self, delay_ms: u64) {
        self.pending_timers += 1;
        #[allow(clippy::cast_precision_loss)]
        self.host.set_timeout(delay_ms as f64 / 1000.0);
    }
}
