//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Bridge spans into OpenTelemetry when exporting is enabled
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured log level
//! - The log filter only gates fmt output; span export has its own fixed
//!   filter, so a quiet log level still exports every operation span

use opentelemetry_sdk::trace::SdkTracer;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Target prefix of the spans exported over OTLP.
const EXPORT_TARGET: &str = "price_calculator";

/// Build the log filter: `RUST_LOG` if set and valid, else `log_level`.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Filter for the OTLP layer: this crate's spans at info and above.
pub fn export_filter() -> Targets {
    Targets::new().with_target(EXPORT_TARGET, Level::INFO)
}

/// Build the subscriber without installing it.
pub fn subscriber(
    log_level: &str,
    tracer: Option<SdkTracer>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let otel_layer = tracer.map(|tracer| {
        tracing_opentelemetry::layer()
            .with_tracer(tracer)
            .with_filter(export_filter())
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter(log_level)))
        .with(otel_layer)
}

/// Install the global subscriber.
pub fn init_subscriber(log_level: &str, tracer: Option<SdkTracer>) -> Result<(), TryInitError> {
    subscriber(log_level, tracer).try_init()
}
