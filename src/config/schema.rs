//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the price calculator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Pricing behaviour.
    pub pricing: PricingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Pricing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Artificial delay before computing a total, in milliseconds.
    /// Makes the calculation span visible in trace views. 0 disables it.
    pub processing_delay_ms: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (e.g. "info" or "price_calculator=debug").
    pub log_level: String,

    /// Export spans to an OTLP collector.
    pub tracing_enabled: bool,

    /// OTLP/HTTP collector base URL. `/v1/traces` is appended.
    pub otlp_endpoint: String,

    /// `service.name` resource attribute.
    pub service_name: String,

    /// Timeout for a single export request in seconds.
    pub export_timeout_secs: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "price_calculator=info,tower_http=info".to_string(),
            tracing_enabled: true,
            otlp_endpoint: "http://localhost:4318".to_string(),
            service_name: "price-calculator".to_string(),
            export_timeout_secs: 10,
        }
    }
}
