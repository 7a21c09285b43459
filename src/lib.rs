//! Poemseek: a Zellij plugin that finds poems containing a word or two.
//!
//! Type into the search box; once typing pauses the plugin looks the term up
//! against PoetryDB's line search and lets you page through the poems found,
//! with every occurrence of the term highlighted.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, Host impl
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Debounced input, fetch lifecycle, browser        │  ← State machine
//! │  - handle_event reducer + AppController shell       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────────┐              ┌───────────────────┐
//! │ UI Layer (ui/)    │              │ Client (client/)  │
//! │ - Rendering       │              │ - Request URLs    │
//! │ - Theming         │              │ - Cancellation    │
//! │ - Components      │              │ - Response parse  │
//! └───────────────────┘              └───────────────────┘
//!         │                                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Poem, RequestId, errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans to a rotating JSON-lines log │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/poemseek.wasm" {
//!         base_url "https://poetrydb.org"
//!         debounce_ms "800"
//!         min_length "2"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use poemseek::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::SearchTermChanged("a".into()), 0);
//! assert_eq!(actions, vec![Action::ScheduleDebounce { delay_ms: 800 }]);
//!
//! // One character is below the minimum length: no lookup is ever issued.
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed, 800);
//! assert!(actions.is_empty());
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppController, AppState, Event, Host, Intent, SearchView};
pub use client::{PoemSearchClient, Transport};
pub use domain::{Poem, PoemseekError, RequestId, Result, SearchError};
pub use ui::Theme;

use app::debouncer::{DEFAULT_MIN_LENGTH, DEFAULT_QUIET_MS};
use app::SearchInputDebouncer;
use client::DEFAULT_BASE_URL;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lookup service root. Default: `https://poetrydb.org`
    pub base_url: String,

    /// Quiet period before the typed term is committed. Default: 800
    pub debounce_ms: u64,

    /// Minimum term length in characters. Default: 2
    pub min_length: usize,

    /// Built-in theme: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme, `~` already expanded to `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the span log. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: DEFAULT_QUIET_MS,
            min_length: DEFAULT_MIN_LENGTH,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses Zellij's configuration map, falling back to defaults for
    /// missing, empty or malformed values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use poemseek::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "300".to_string());
    /// map.insert("min_length".to_string(), "three".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce_ms, 300);
    /// assert_eq!(config.min_length, 2);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| non_empty_value(config, key);

        let base_url = non_empty("base_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let debounce_ms = non_empty("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        let min_length = non_empty("min_length")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.min_length);

        Self {
            base_url,
            debounce_ms,
            min_length,
            theme_name: non_empty("theme").map(String::from),
            theme_file: non_empty("theme_file").map(infrastructure::expand_tilde),
            trace_level: non_empty("trace_level").map(String::from),
        }
    }

    /// A search client pointed at `base_url`.
    #[must_use]
    pub fn search_client(&self) -> PoemSearchClient {
        PoemSearchClient::new(self.base_url.as_str())
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default"),
            }
        } else if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }
        Theme::default()
    }
}

fn non_empty_value<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Creates an empty [`AppState`] configured from `config`.
///
/// # Example
///
/// ```rust
/// use poemseek::{initialize, Config};
///
/// let state = initialize(&Config { debounce_ms: 250, ..Default::default() });
/// assert_eq!(state.input(), "");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, debounce_ms = config.debounce_ms, "initializing poemseek");
    let debouncer = SearchInputDebouncer::new(config.debounce_ms, config.min_length);
    AppState::with_debouncer(config.theme(), debouncer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn values_are_parsed_and_normalized() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "http://localhost:3000/"),
            ("debounce_ms", " 250 "),
            ("min_length", "3"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/themes/dusk.toml"),
            ("trace_level", "debug"),
        ]));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.min_length, 3);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/dusk.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[("base_url", "/"), ("debounce_ms", "-5"), ("min_length", ""), ("theme", " ")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn theme_resolution_falls_back_to_default() {
        let named = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(named.theme().name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(unknown.theme(), Theme::default());

        let missing_file = Config {
            theme_file: Some("/no/such/theme.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(missing_file.theme(), Theme::default());
    }

    #[test]
    fn search_client_uses_base_url() {
        let config = Config {
            base_url: "http://localhost:3000".to_string(),
            ..Config::default()
        };
        assert_eq!(config.search_client().request_url("hope"), "http://localhost:3000/lines/hope/.json");
    }
}
