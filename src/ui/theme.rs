//! Colour themes for the poem pane, rendered as 24-bit ANSI escapes.
//!
//! Themes are TOML documents. Two Catppuccin variants are embedded; anything
//! else is loaded from a file named in the plugin configuration.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark, the default
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! title_fg = "#cba6f7"
//! author_fg = "#a6adc8"
//! error_fg = "#f38ba8"
//! status_fg = "#94e2d5"
//! nav_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use poemseek::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! assert!(Theme::fg(&theme.colors.header_fg).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::{PoemseekError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, placeholder and other secondary text.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Search term occurrences inside poem lines.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub title_fg: String,
    pub author_fg: String,

    /// "Oh no" line.
    pub error_fg: String,
    /// "Finding you poems" line.
    pub status_fg: String,
    /// Previous/next arrows and position.
    pub nav_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name; `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Reads a TOML theme from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PoemseekError::Theme`] if the file cannot be read or is not a
    /// complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| PoemseekError::Theme(format!("failed to read {}: {e}", path.as_ref().display())))?;

        toml::from_str(&contents).map_err(|e| PoemseekError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; anything malformed becomes white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn italic() -> &'static str {
        "\u{001b}[3m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("Built-in catppuccin-mocha theme should always parse")
    }
}
