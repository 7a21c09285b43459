//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain and
//! client layers. It owns every piece of mutable search state.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Keys/Timers → Events → handle_event → State Mutations → Actions → Host
//!                             ↑                                       ↓
//!                             └──────── Web request results ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`browser`]: Clamped cursor over the current result set
//! - [`controller`]: Imperative shell executing actions against a [`Host`]
//! - [`debouncer`]: Quiet-period and minimum-length gate for search input
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`lifecycle`]: Idle/Requesting/Succeeded/Failed state of the lookup
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use poemseek::app::{handle_event, AppState, Event};
//! use poemseek::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (should_render, _actions) = handle_event(&mut state, &Event::Char('h'), 0);
//! assert!(should_render);
//! ```

pub mod actions;
pub mod browser;
pub mod controller;
pub mod debouncer;
pub mod handler;
pub mod lifecycle;
pub mod state;

pub use actions::Action;
pub use browser::PoemBrowser;
pub use controller::{AppController, Host};
pub use debouncer::SearchInputDebouncer;
pub use handler::{handle_event, Event, Intent};
pub use lifecycle::{FetchLifecycle, LifecycleStatus};
pub use state::{AppState, SearchView};
