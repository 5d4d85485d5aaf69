//! Logging and span export.
//!
//! ```text
//! tracing macros ─▶ EnvFilter ─┬─▶ fmt layer ─▶ stderr
//!                              └─▶ tracing-opentelemetry ─▶ SDK ─▶ FileSpanExporter ─▶ JSON lines
//! ```
//!
//! The span file lives in the data directory and rotates at 10 MiB, keeping three
//! backups.
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - [`span_record`]: the JSON shape of one exported span
//! - [`file_writer`]: size-rotated line writer

pub mod file_writer;
mod init;
pub mod span_record;
mod tracer;

pub use file_writer::{RotatingFile, RotationPolicy};
pub use init::{init_tracing, SPAN_FILE_NAME};
pub use span_record::SpanRecord;
