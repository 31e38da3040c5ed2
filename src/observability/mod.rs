//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers produce:
//!     → tracing.rs (SpanReporter: one span per operation)
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → OTLP collector (batched span export, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request log line
//! - Telemetry is best-effort and never fails a request

pub mod logging;
pub mod tracing;

pub use self::logging::init_subscriber;
pub use self::tracing::{
    record_error, NoopReporter, Operation, RecordingReporter, SpanReporter, Telemetry, TelemetryError,
    TracingReporter,
};
