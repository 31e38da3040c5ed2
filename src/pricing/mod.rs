//! Pricing subsystem.
//!
//! # Data Flow
//! ```text
//! POST /setBasePrice/{v}, /setTaxRate/{v}
//!     → store.rs (ConfigStore, guarded snapshot)
//!
//! POST /calculate
//!     → store.rs (read snapshot)
//!     → engine.rs (total = base + base * rate / 100)
//!     → types.rs (PriceResponse)
//! ```
//!
//! # Design Decisions
//! - One store per process, owned by the server and shared via Arc
//! - The engine is a pure function; inputs are never clamped

pub mod engine;
pub mod store;
pub mod types;

pub use engine::compute_total;
pub use store::ConfigStore;
pub use types::{MessageResponse, PriceRequest, PriceResponse, PriceSettings};
