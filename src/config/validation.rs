//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the collector endpoint is an absolute HTTP(S) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address: {}", config.listener.bind_address, e),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    let observability = &config.observability;
    if let Err(e) = EnvFilter::try_new(&observability.log_level) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("invalid filter directive: {}", e),
        ));
    }

    if observability.service_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "observability.service_name",
            "must not be empty",
        ));
    }

    if observability.tracing_enabled {
        match Url::parse(&observability.otlp_endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "observability.otlp_endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "observability.otlp_endpoint",
                format!("'{}' is not a URL: {}", observability.otlp_endpoint, e),
            )),
        }

        if observability.export_timeout_secs == 0 {
            errors.push(ValidationError::new(
                "observability.export_timeout_secs",
                "must be greater than zero",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.observability.service_name = "  ".into();
        config.observability.otlp_endpoint = "ftp://collector:4318".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "timeouts.request_secs",
                "observability.service_name",
                "observability.otlp_endpoint",
            ]
        );
    }

    #[test]
    fn test_endpoint_ignored_when_tracing_disabled() {
        let mut config = ServiceConfig::default();
        config.observability.tracing_enabled = false;
        config.observability.otlp_endpoint = "garbage".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let mut config = ServiceConfig::default();
        config.observability.otlp_endpoint = "localhost:4318/v1".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.otlp_endpoint");
    }
}
