//! Flat JSON span records.
//!
//! Each finished span becomes one self-contained JSON object, so the log can
//! be read with `jq` line by line:
//!
//! ```json
//! {"service":"poemseek","traceId":"…","spanId":"…","parentSpanId":"…",
//!  "name":"resolve_lookup","startUnixNano":"…","durationMicros":412,
//!  "attributes":{"request":"#3","status":200},"events":[],"status":"unset"}
//! ```

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::Value;
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanRecord<'a> {
    service: &'a str,
    trace_id: String,
    span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<String>,
    name: &'a str,
    start_unix_nano: String,
    duration_micros: u64,
    attributes: BTreeMap<String, JsonValue>,
    events: Vec<EventRecord<'a>>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord<'a> {
    name: &'a str,
    unix_nano: String,
    attributes: BTreeMap<String, JsonValue>,
}

/// Serializes spans for one service.
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    /// Takes the service name from the resource's `service.name`.
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .iter()
            .find(|(key, _)| key.as_str() == "service.name")
            .map_or_else(|| "unknown".to_string(), |(_, value)| value.as_str().into_owned());
        Self { service }
    }

    /// One JSON line for `span`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format_span(&self, span: &SpanData) -> serde_json::Result<String> {
        let (status, error) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(description.to_string())),
        };

        let duration = span.end_time.duration_since(span.start_time).unwrap_or_default();

        let record = SpanRecord {
            service: &self.service,
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id: (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id)),
            name: &span.name,
            start_unix_nano: unix_nanos(span.start_time),
            duration_micros: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: &event.name,
                    unix_nano: unix_nanos(event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
            status,
            error,
        };

        serde_json::to_string(&record)
    }
}

fn attribute_map(attributes: &[opentelemetry::KeyValue]) -> BTreeMap<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

/// Native JSON for scalars; arrays fall back to their display form.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("service", &self.service).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    #[test]
    fn service_name_comes_from_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "poemseek")]);
        assert_eq!(SpanFormatter::new(&resource).service, "poemseek");
    }

    #[test]
    fn attributes_keep_their_json_types() {
        let map = attribute_map(&[
            KeyValue::new("status", 200_i64),
            KeyValue::new("was_in_flight", true),
            KeyValue::new("request", "#3"),
        ]);
        assert_eq!(map["status"], JsonValue::from(200));
        assert_eq!(map["was_in_flight"], JsonValue::Bool(true));
        assert_eq!(map["request"], JsonValue::String("#3".to_string()));
    }

    #[test]
    fn epoch_is_zero_nanos() {
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH), "0");
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH + Duration::from_micros(5)), "5000");
    }
}
