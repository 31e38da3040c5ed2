//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the pricing handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{request_id_of, MakeRequestUuidV4};
use crate::observability::SpanReporter;
use crate::pricing::ConfigStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub reporter: Arc<dyn SpanReporter>,
    pub processing_delay: Duration,
}

impl AppState {
    pub fn new(store: Arc<ConfigStore>, reporter: Arc<dyn SpanReporter>) -> Self {
        Self {
            store,
            reporter,
            processing_delay: Duration::ZERO,
        }
    }

    /// Set the artificial delay applied before each calculation.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }
}

/// Build the pricing router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    otel.kind = "server",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id_of(request),
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .route("/calculate", post(handlers::calculate_price))
        .route("/setBasePrice/{value}", post(handlers::set_base_price))
        .route("/setTaxRate/{value}", post(handlers::set_tax_rate))
        .with_state(state)
        .layer(middleware)
}

/// HTTP server for the price calculator.
pub struct HttpServer {
    router: Router,
    store: Arc<ConfigStore>,
}

impl HttpServer {
    /// Create a server with a fresh, zeroed pricing store.
    pub fn new(config: &ServiceConfig, reporter: Arc<dyn SpanReporter>) -> Self {
        Self::with_store(config, Arc::new(ConfigStore::new()), reporter)
    }

    /// Create a server around an existing store.
    pub fn with_store(
        config: &ServiceConfig,
        store: Arc<ConfigStore>,
        reporter: Arc<dyn SpanReporter>,
    ) -> Self {
        let state = AppState::new(store.clone(), reporter)
            .with_processing_delay(Duration::from_millis(config.pricing.processing_delay_ms));
        let router = build_router(state, Duration::from_secs(config.timeouts.request_secs));

        Self { router, store }
    }

    /// The store backing this server.
    pub fn store(&self) -> Arc<ConfigStore> {
        self.store.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
