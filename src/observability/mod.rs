//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → rotating JSON file
//! ```
//!
//! Traces land in `~/.local/share/zellij/zsfile/zsfile-otlp.json` (seen from
//! the sandbox as `/host/...`), one OTLP/JSON document per line. The file
//! rotates at 10 MB and keeps 3 backups. The level comes from the
//! `trace_level` plugin option and defaults to `info`.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `exporter`: tracer provider and span exporter
//! - `otlp`: OTLP/JSON encoding
//! - `rotating`: size-rotated line writer

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
