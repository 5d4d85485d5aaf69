//! Subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use std::sync::Once;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the span file inside the data directory.
pub const SPAN_FILE_NAME: &str = "poi-countries-spans.json";

const SERVICE_NAME: &str = "poi-countries";

static INIT: Once = Once::new();

/// Installs the global tracing subscriber.
///
/// Level comes from `RUST_LOG` if set, then `config.trace_level`, then `info`.
/// Log lines go to stderr; finished spans are exported to
/// [`SPAN_FILE_NAME`] in the data directory. If that directory cannot be
/// created, span export is skipped and only stderr logging is installed.
///
/// Only the first call does anything. Later calls neither open a new span file
/// nor replace the global tracer provider.
///
/// ```rust
/// use poi_countries::observability::init_tracing;
/// use poi_countries::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     data_dir: Some(dir.path().display().to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    INIT.call_once(|| install(config));
}

fn install(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let data_dir = crate::infrastructure::data_dir(config.data_dir.as_deref());
    let otel_layer = match std::fs::create_dir_all(&data_dir) {
        Ok(()) => {
            let provider = tracer::create_tracer_provider(
                data_dir.join(SPAN_FILE_NAME),
                RotationPolicy::default(),
                SERVICE_NAME,
            );
            let tracer = provider.tracer(SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(provider);
            Some(OpenTelemetryLayer::new(tracer))
        }
        Err(_) => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(otel_layer)
        .try_init();
}
