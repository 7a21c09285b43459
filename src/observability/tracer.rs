//! Tracer provider exporting spans to the rotating span log.

use super::file_writer::RotatingFile;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes every exported span as one JSON line.
struct JsonLinesExporter {
    writer: RotatingFile,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("span log exporter is shut down"))));
        }

        let result = batch.iter().try_for_each(|span| {
            let line = self.formatter.format_span(span).map_err(|e| TraceError::from(e.to_string()))?;
            self.writer.write_line(&line).map_err(|e| TraceError::from(e.to_string()))
        });

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a provider that exports each span synchronously as it ends.
pub fn create_tracer_provider(writer: RotatingFile, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter {
        writer,
        formatter: SpanFormatter::new(&resource),
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::file_writer::{MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
    use opentelemetry::trace::{Tracer as _, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "poemseek")]);
        let provider = create_tracer_provider(
            RotatingFile::new(path.clone(), MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES),
            resource,
        );

        provider.tracer("poemseek").in_span("resolve_lookup", |_cx| {});

        let contents = std::fs::read_to_string(path).unwrap();
        let record: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(record["service"], "poemseek");
        assert_eq!(record["name"], "resolve_lookup");
        assert_eq!(record["status"], "unset");
    }
}
