//! Startup orchestration.
//!
//! # Responsibilities
//! - Build telemetry and install the subscriber
//! - Start the Tokio runtime, bind the listener and serve
//! - Flush telemetry after the runtime has stopped
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The tracer provider lives outside the runtime (blocking OTLP client)
//! - Listener binds last, after observability is up

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::util::TryInitError;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::{init_subscriber, SpanReporter, Telemetry, TelemetryError};

/// Errors that abort startup or serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("telemetry: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("bind failed on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serve error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the service to completion with the given configuration.
pub fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let telemetry = Telemetry::init(&config.observability)?;
    init_subscriber(&config.observability.log_level, telemetry.tracer())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        processing_delay_ms = config.pricing.processing_delay_ms,
        tracing_enabled = telemetry.is_enabled(),
        otlp_endpoint = %config.observability.otlp_endpoint,
        "price-calculator starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    let result = runtime.block_on(serve(&config, telemetry.reporter()));
    drop(runtime);

    telemetry.shutdown();
    tracing::info!("Shutdown complete");
    result
}

/// Bind the configured address and serve until SIGINT/SIGTERM.
pub async fn serve(
    config: &ServiceConfig,
    reporter: Arc<dyn SpanReporter>,
) -> Result<(), StartupError> {
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "Server is running on http://{}", addr);
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_task = shutdown.trigger_on_signal();

    let server = HttpServer::new(config, reporter);
    let result = server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve);

    signal_task.abort();
    result
}
