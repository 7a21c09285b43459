//! Subscriber setup.

use super::file_writer::{RotatingFile, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Span log file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "poemseek-spans.jsonl";

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level` (any `EnvFilter` directive,
/// default `"info"`; malformed directives fall back to `"info"`). Spans are
/// written to [`TRACE_FILE_NAME`] under the data directory.
///
/// Observability is optional: if the data directory cannot be created this
/// does nothing. Only the first call takes effect.
///
/// # Example
///
/// ```rust
/// use poemseek::observability::init_tracing;
/// use poemseek::Config;
///
/// let config = Config {
///     trace_level: Some("poemseek=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "poemseek"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let writer = RotatingFile::new(data_dir.join(TRACE_FILE_NAME), MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES);
    let provider = tracer::create_tracer_provider(writer, resource);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer("poemseek"));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
