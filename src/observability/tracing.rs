//! Span reporting and OTLP export.
//!
//! # Responsibilities
//! - Give handlers a span per operation through [`SpanReporter`]
//! - Build the OpenTelemetry tracer provider with a batched OTLP/HTTP exporter
//! - Flush and shut the provider down on exit
//!
//! # Design Decisions
//! - Handlers only see the `SpanReporter` trait; the exporter is wired in
//!   through the `tracing` subscriber (see `logging.rs`)
//! - Export is fire-and-forget: the batch processor drops and logs failures
//! - The provider is built and shut down outside the async runtime, since
//!   the default OTLP HTTP client is blocking

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use tracing::Span;

use crate::config::ObservabilityConfig;

/// Instrumentation scope name for spans produced by this service.
pub const TRACER_NAME: &str = "price-calculator";

/// Traced operations, one per handler plus the inner calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CalculatePrice,
    CalculateTotalPrice,
    SetBasePrice,
    SetTaxRate,
}

impl Operation {
    /// Span name reported to the collector.
    pub fn name(self) -> &'static str {
        match self {
            Operation::CalculatePrice => "CalculatePrice",
            Operation::CalculateTotalPrice => "CalculateTotalPrice",
            Operation::SetBasePrice => "SetBasePrice",
            Operation::SetTaxRate => "SetTaxRate",
        }
    }
}

/// Sink for operation spans.
pub trait SpanReporter: Send + Sync + 'static {
    /// Open a span for `operation`. It closes when the returned span is dropped.
    fn span(&self, operation: Operation) -> Span;
}

/// Reports operations as `tracing` spans, exported by whatever layers the
/// global subscriber carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SpanReporter for TracingReporter {
    fn span(&self, operation: Operation) -> Span {
        tracing::info_span!(
            "operation",
            otel.name = operation.name(),
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty,
        )
    }
}

/// Mark `span` as failed for the collector.
pub fn record_error(span: &Span) {
    span.record("otel.status_code", "ERROR");
}

/// Discards every span.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl SpanReporter for NoopReporter {
    fn span(&self, _operation: Operation) -> Span {
        Span::none()
    }
}

/// Records the operations it is asked to report, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    operations: Mutex<Vec<Operation>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations reported so far.
    pub fn operations(&self) -> Vec<Operation> {
        self.operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SpanReporter for RecordingReporter {
    fn span(&self, operation: Operation) -> Span {
        self.operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(operation);
        Span::none()
    }
}

/// Errors raised while building the telemetry pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),
}

/// Owns the tracer provider for the lifetime of the process.
pub struct Telemetry {
    provider: Option<SdkTracerProvider>,
}

impl Telemetry {
    /// Build the OTLP pipeline, or a disabled one if tracing is off.
    pub fn init(config: &ObservabilityConfig) -> Result<Self, TelemetryError> {
        if !config.tracing_enabled {
            return Ok(Self::disabled());
        }

        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(traces_endpoint(&config.otlp_endpoint))
            .with_timeout(Duration::from_secs(config.export_timeout_secs))
            .build()?;

        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
            .build();

        let provider = SdkTracerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(exporter)
            .build();

        Ok(Self {
            provider: Some(provider),
        })
    }

    /// Telemetry that exports nothing.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Tracer to bridge into the `tracing` subscriber, if exporting.
    pub fn tracer(&self) -> Option<SdkTracer> {
        self.provider
            .as_ref()
            .map(|provider| provider.tracer(TRACER_NAME))
    }

    /// Reporter handed to the HTTP handlers.
    pub fn reporter(&self) -> Arc<dyn SpanReporter> {
        Arc::new(TracingReporter)
    }

    /// Flush pending spans and stop the exporter. Failures are only logged.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Error shutting down tracer provider");
            }
        }
    }
}

/// Signal-specific OTLP/HTTP path for a collector base URL.
pub fn traces_endpoint(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/v1/traces") {
        base.to_string()
    } else {
        format!("{}/v1/traces", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_are_distinct() {
        let names = [
            Operation::CalculatePrice.name(),
            Operation::CalculateTotalPrice.name(),
            Operation::SetBasePrice.name(),
            Operation::SetTaxRate.name(),
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_traces_endpoint() {
        assert_eq!(
            traces_endpoint("http://localhost:4318"),
            "http://localhost:4318/v1/traces"
        );
        assert_eq!(
            traces_endpoint("http://localhost:4318/"),
            "http://localhost:4318/v1/traces"
        );
        assert_eq!(
            traces_endpoint("https://otel.example.com/v1/traces"),
            "https://otel.example.com/v1/traces"
        );
    }

    #[test]
    fn test_disabled_telemetry_has_no_tracer() {
        let config = ObservabilityConfig {
            tracing_enabled: false,
            ..ObservabilityConfig::default()
        };
        let telemetry = Telemetry::init(&config).unwrap();
        assert!(!telemetry.is_enabled());
        assert!(telemetry.tracer().is_none());
        telemetry.shutdown();
    }

    #[test]
    fn test_recording_reporter_keeps_order() {
        let reporter = RecordingReporter::new();
        let _ = reporter.span(Operation::SetTaxRate);
        let _ = reporter.span(Operation::CalculatePrice);
        assert_eq!(
            reporter.operations(),
            vec![Operation::SetTaxRate, Operation::CalculatePrice]
        );
    }
}
