//! Subscriber setup.

use super::exporter;
use super::rotating::{RotatingFile, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "zsfile-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// `<data dir>/zsfile-otlp.json`.
///
/// Does nothing if the data directory cannot be created. Safe to call more
/// than once; only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "zsfile"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let file = RotatingFile::new(data_dir.join(TRACE_FILE_NAME), DEFAULT_MAX_BYTES, DEFAULT_BACKUPS);
    let provider = exporter::create_tracer_provider(file, resource);
    let tracer = provider.tracer("zsfile");

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
