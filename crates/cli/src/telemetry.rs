//! Observability wiring for the binary.
//!
//! Library crates only emit `tracing` spans and events; this module installs
//! the subscriber that receives them. Output goes to stderr so that stdout
//! carries nothing but command results.

use clap::ValueEnum;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::SpanExporter;
use opentelemetry_sdk::runtime;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// When set, spans are also exported over OTLP (gRPC) to this endpoint.
pub const OTLP_ENDPOINT_ENV_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

const DEFAULT_FILTER: &str = "warn";
const EXPORT_FILTER: &str = "info";
const TRACER_NAME: &str = "cadre";

/// Format of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event, including the active span list.
    Json,
}

/// Handle to installed telemetry; flush it with [`Telemetry::shutdown`] before exit.
#[derive(Debug)]
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flushes and stops the OTLP exporter, if one was installed.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(err) = provider.shutdown() {
                eprintln!("failed to flush OpenTelemetry spans: {err}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// Log lines are filtered by `RUST_LOG` (default `warn`). Exported spans have
/// their own `info` filter, so a quiet stderr still exports every dispatch
/// span. Must be called from within a Tokio runtime when
/// [`OTLP_ENDPOINT_ENV_VAR`] is set, since the batch exporter runs on it.
pub fn init(format: LogFormat) -> anyhow::Result<Telemetry> {
    let (json_layer, text_layer) = match format {
        LogFormat::Json => (
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Text => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    let provider = match std::env::var_os(OTLP_ENDPOINT_ENV_VAR) {
        Some(_) => Some(otlp_provider()?),
        None => None,
    };
    let otel_layer = provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME)));

    tracing_subscriber::registry()
        .with(json_layer.with_filter(log_filter()))
        .with(text_layer.with_filter(log_filter()))
        .with(otel_layer.with_filter(export_filter()))
        .try_init()?;

    Ok(Telemetry { provider })
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn export_filter() -> EnvFilter {
    EnvFilter::new(EXPORT_FILTER)
}

fn otlp_provider() -> anyhow::Result<TracerProvider> {
    // The exporter reads the endpoint and headers from the standard OTEL_* variables.
    let exporter = SpanExporter::builder().with_tonic().build()?;
    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .build())
}
