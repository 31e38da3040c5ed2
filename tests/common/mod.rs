//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use price_calculator::client::PriceClient;
use price_calculator::observability::{NoopReporter, SpanReporter};
use price_calculator::{ConfigStore, HttpServer, ServiceConfig, Shutdown};
use tokio::net::TcpListener;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<ConfigStore>,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> PriceClient {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        PriceClient::with_client(client, &self.url())
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .unwrap()
            .unwrap();
    }
}

/// Start a server with no processing delay and a no-op reporter.
pub async fn start_server() -> TestServer {
    start_server_with(Arc::new(NoopReporter), 0).await
}

/// Start a server with the given reporter and processing delay.
pub async fn start_server_with(reporter: Arc<dyn SpanReporter>, delay_ms: u64) -> TestServer {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.pricing.processing_delay_ms = delay_ms;
    config.observability.tracing_enabled = false;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(&config, reporter);
    let store = server.store();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        store,
        shutdown,
        handle,
    }
}
