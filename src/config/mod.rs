//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to observability and the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Service config is immutable once loaded; pricing state lives in
//!   `pricing::ConfigStore`, not here
//! - All fields have defaults so the service runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{read_config, resolve_config, resolve_with, ConfigError};
pub use schema::ServiceConfig;
pub use schema::{ListenerConfig, ObservabilityConfig, PricingConfig, TimeoutConfig};
pub use validation::ValidationError;
