//! Span exporter that appends OTLP/JSON lines to a rotating file.
//!
//! The plugin sandbox has no network collector, so spans are written to disk
//! and can be replayed into any OTLP tool later.

use super::otlp;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    /// Writes the whole batch as one line.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, &batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports each finished span immediately to `file`.
pub fn create_tracer_provider(file: RotatingFile, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file,
        resource: resource.clone(),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
