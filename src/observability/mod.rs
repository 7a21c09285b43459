//! OpenTelemetry-based tracing with a local span log.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer → JsonLinesExporter → poemseek-spans.jsonl
//! ```
//!
//! The log lives at `~/.local/share/zellij/poemseek/poemseek-spans.jsonl`,
//! one JSON object per span, rotated at 5 MiB with three numbered backups.
//! Web request context carries the issuing span's trace id, so a lookup and
//! the handling of its response share one trace.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider and span exporter
//! - `span_formatter`: Span to JSON record conversion
//! - `file_writer`: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
