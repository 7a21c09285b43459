//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the poemseek library and Zellij. Key
//! presses, timer ticks and web request results are translated into calls on
//! [`AppController`]; the controller talks back through [`ZellijHost`].
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build the controller
//! 2. **Permissions**: Request `WebAccess` for the lookup service
//! 3. **Subscribe**: `Key`, `Timer`, `WebRequestResult`, `PermissionRequestResult`, `BeforeClose`
//! 4. **Update**: Map events, let the controller handle them
//! 5. **Render**: Call the library render function
//! 6. **Close**: `BeforeClose` tears down pending lookups
//!
//! # Keybindings
//!
//! - Printable characters: Type into the search box
//! - `Backspace`: Delete the last character
//! - `Left` / `Ctrl+p`: Previous poem
//! - `Right` / `Ctrl+n`: Next poem
//! - `Ctrl+u`: Clear the search box
//! - `Esc`: Clear the search box, or close the pane when it is already empty
//!
//! The plugin only runs inside Zellij; on other targets the binary just
//! explains how to build it.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_arch = "wasm32")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use poemseek::{AppController, Config, Host, Intent, Transport};

    /// [`Host`] backed by the Zellij plugin API.
    #[derive(Debug, Default)]
    pub struct ZellijHost;

    impl Transport for ZellijHost {
        fn get(&mut self, url: &str, context: BTreeMap<String, String>) {
            web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
        }
    }

    impl Host for ZellijHost {
        fn set_timeout(&mut self, seconds: f64) {
            zellij_tile::prelude::set_timeout(seconds);
        }

        fn close(&mut self) {
            hide_self();
        }

        fn now_ms(&self) -> u64 {
            u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
        }
    }

    /// Plugin state wrapper.
    pub struct State {
        app: AppController<ZellijHost>,
    }

    impl Default for State {
        fn default() -> Self {
            let config = Config::default();
            Self {
                app: AppController::new(poemseek::initialize(&config), config.search_client(), ZellijHost),
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            poemseek::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(config = ?config, "parsed configuration");
            self.app = AppController::new(poemseek::initialize(&config), config.search_client(), ZellijHost);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
                EventType::Timer,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
                EventType::BeforeClose,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
            let _guard = span.entered();

            match event {
                Event::Key(ref key) => match Self::map_key_event(key) {
                    Some(intent) => self.app.dispatch(intent),
                    None => false,
                },
                Event::Timer(_elapsed) => self.app.on_timer(),
                Event::WebRequestResult(status, _headers, body, context) => {
                    self.app.on_web_response(status, &body, &context)
                }
                Event::PermissionRequestResult(status) => {
                    match status {
                        PermissionStatus::Granted => tracing::debug!("web access granted"),
                        PermissionStatus::Denied => tracing::warn!("web access denied - lookups will fail"),
                    }
                    false
                }
                Event::BeforeClose => {
                    self.app.teardown();
                    false
                }
                _ => false,
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            poemseek::ui::render(self.app.state(), rows, cols);
        }
    }

    impl State {
        fn get_event_name(event: &Event) -> String {
            match event {
                Event::Key(key) => format!("Key({:?})", key.bare_key),
                Event::Timer(..) => "Timer".to_string(),
                Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
                Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                Event::BeforeClose => "BeforeClose".to_string(),
                _ => "Other".to_string(),
            }
        }

        fn map_key_event(key: &KeyWithModifier) -> Option<Intent> {
            tracing::debug!(bare_key = ?key.bare_key, "key event");

            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char('p') => Some(Intent::RequestPrevious),
                    BareKey::Char('n') => Some(Intent::RequestNext),
                    BareKey::Char('u') => Some(Intent::ClearInput),
                    _ => None,
                };
            }

            Some(match key.bare_key {
                BareKey::Left => Intent::RequestPrevious,
                BareKey::Right => Intent::RequestNext,
                BareKey::Esc => Intent::Escape,
                BareKey::Backspace => Intent::Backspace,
                BareKey::Char(c) if !c.is_control() => Intent::Char(c),
                _ => return None,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
use plugin::State;
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
register_plugin!(State);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("poemseek is a Zellij plugin: build it with `--target wasm32-wasip1` and load the .wasm from Zellij");
}
