//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled output through composable
//! rendering components, with theme support and search term highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → frame → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (cursor moves, highlighting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    BrowserInfo, DisplayLine, EmptyState, FooterInfo, HeaderInfo, PoemPanel, SearchBarInfo, StatusLine, UIViewModel,
};
