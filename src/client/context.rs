//! Request context carried through the host runtime.
//!
//! Zellij's `web_request` accepts an opaque `BTreeMap<String, String>` that it
//! hands back untouched with the matching `WebRequestResult` event. The client
//! stores a JSON-encoded [`RequestContext`] under a single key in that map, so a
//! response can be matched to the lookup that issued it and its handling can be
//! linked to the span that sent it.

use crate::domain::error::{PoemseekError, Result};
use crate::domain::RequestId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the encoded context is stored in the host's context map.
pub const CONTEXT_KEY: &str = "poemseek";

/// Tracing context for linking response handling to the issuing span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a 32-digit hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a 16-digit hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry identity of the current tracing span.
    ///
    /// Returns `None` when no valid span context is active, e.g. when tracing
    /// was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created while the
    /// returned guard is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }
}

/// Everything the client needs to recognise a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Builds a context for `request_id`, capturing the current trace context.
    #[must_use]
    pub fn new(request_id: RequestId, term: impl Into<String>) -> Self {
        Self {
            request_id,
            term: term.into(),
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context into a host context map.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_map(&self) -> Result<BTreeMap<String, String>> {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_KEY.to_string(), serde_json::to_string(self)?);
        Ok(map)
    }

    /// Decodes a context previously produced by [`to_map`](Self::to_map).
    ///
    /// # Errors
    ///
    /// Returns [`PoemseekError::Context`] if the key is missing and
    /// [`PoemseekError::Json`] if the value does not decode.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let encoded = map
            .get(CONTEXT_KEY)
            .ok_or_else(|| PoemseekError::Context(format!("missing `{CONTEXT_KEY}` key")))?;
        Ok(serde_json::from_str(encoded)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_survives_the_host_map() {
        let ctx = RequestContext {
            request_id: RequestId(7),
            term: "hope springs".to_string(),
            trace_context: None,
        };
        let map = ctx.to_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(RequestContext::from_map(&map).unwrap(), ctx);
    }

    #[test]
    fn missing_key_is_a_context_error() {
        let err = RequestContext::from_map(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, PoemseekError::Context(_)));
    }

    #[test]
    fn garbage_value_is_a_json_error() {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_KEY.to_string(), "not json".to_string());
        assert!(matches!(RequestContext::from_map(&map), Err(PoemseekError::Json(_))));
    }

    #[test]
    fn no_trace_context_without_subscriber() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn malformed_trace_ids_do_not_attach() {
        let ctx = TraceContext {
            trace_id: "zz".to_string(),
            parent_span_id: "zz".to_string(),
        };
        assert!(ctx.attach().is_none());
    }
}
