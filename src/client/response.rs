//! Classification of lookup responses.
//!
//! The service answers a line search with one of two JSON shapes:
//!
//! ```text
//! [{"title": "...", "author": "...", "lines": ["..."], "linecount": "14"}, ...]
//! {"status": 404, "reason": "Not found"}
//! ```
//!
//! Anything else, including an empty array, a status marker other than 404, a
//! poem missing a field, or a non-success HTTP status, is a transport error.

use crate::domain::{Poem, ResultSet, SearchError};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Status code the service uses in its "not found" marker.
const NOT_FOUND_STATUS: u64 = 404;

/// Longest body excerpt copied into an error message.
const BODY_EXCERPT_CHARS: usize = 120;

#[derive(Debug, Deserialize)]
struct StatusMarker {
    status: u64,
    #[serde(default)]
    reason: Option<String>,
}

/// Maps an HTTP status and body to the lookup outcome.
///
/// # Errors
///
/// Returns [`SearchError::NotFound`] for the service's not-found marker and
/// [`SearchError::Transport`] for every other failure.
pub fn classify(status: u16, body: &[u8]) -> Result<ResultSet, SearchError> {
    let http_ok = (200..300).contains(&status);
    if !http_ok && u64::from(status) != NOT_FOUND_STATUS {
        return Err(SearchError::Transport(format!("HTTP {status}: {}", excerpt(body))));
    }

    let payload: JsonValue = serde_json::from_slice(body)
        .map_err(|e| SearchError::transport(format!("malformed response: {e}")))?;

    match payload {
        JsonValue::Array(items) if items.is_empty() => {
            Err(SearchError::transport("service returned an empty poem list"))
        }
        JsonValue::Array(items) if http_ok => items
            .into_iter()
            .map(serde_json::from_value::<Poem>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SearchError::transport(format!("malformed response: {e}"))),
        JsonValue::Object(_) => {
            let marker: StatusMarker = serde_json::from_value(payload)
                .map_err(|e| SearchError::transport(format!("malformed response: {e}")))?;
            if marker.status == NOT_FOUND_STATUS {
                Err(SearchError::NotFound)
            } else {
                Err(SearchError::Transport(format!(
                    "service status {}: {}",
                    marker.status,
                    marker.reason.unwrap_or_default()
                )))
            }
        }
        _ if !http_ok => Err(SearchError::Transport(format!("HTTP {status}: {}", excerpt(body)))),
        other => Err(SearchError::Transport(format!(
            "malformed response: unexpected {}",
            json_kind(&other)
        ))),
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.chars().count() > BODY_EXCERPT_CHARS {
        let cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
