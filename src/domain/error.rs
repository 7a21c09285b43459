//! Error types for the poemseek plugin.
//!
//! Two families live here. [`SearchError`] classifies the outcome of a single
//! poem lookup and is always recovered into the fetch lifecycle's `Failed`
//! state. [`PoemseekError`] covers everything else that can go wrong inside the
//! plugin (configuration, themes, request bookkeeping) and is surfaced through
//! the crate-wide [`Result`] alias.

use thiserror::Error;

/// Why a poem lookup did not produce a result set.
///
/// Cancellation is deliberately absent: a cancelled lookup never produces a
/// value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The service answered with its explicit "not found" status marker.
    ///
    /// An empty poem list is *not* this variant.
    #[error("no poems for this search term")]
    NotFound,

    /// Network, protocol or payload failure.
    ///
    /// Covers unexpected HTTP statuses and response bodies that do not match
    /// either known payload shape.
    #[error("{0}")]
    Transport(String),
}

impl SearchError {
    /// Builds a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }
}

/// The main error type for poemseek plugin operations.
#[derive(Debug, Error)]
pub enum PoemseekError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A web request context map could not be decoded.
    ///
    /// Raised when a `WebRequestResult` arrives without the keys this plugin
    /// attaches to every outgoing request.
    #[error("Request context error: {0}")]
    Context(String),
}

/// A specialized `Result` type for poemseek operations.
pub type Result<T> = std::result::Result<T, PoemseekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_user_facing_message() {
        assert_eq!(SearchError::NotFound.to_string(), "no poems for this search term");
    }

    #[test]
    fn transport_keeps_cause_text() {
        let err = SearchError::transport("HTTP 503: unavailable");
        assert_eq!(err, SearchError::Transport("HTTP 503: unavailable".to_string()));
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PoemseekError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
