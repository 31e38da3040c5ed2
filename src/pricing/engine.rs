//! Total price computation.

use crate::pricing::types::{PriceRequest, PriceResponse};

/// Compute `base_price + base_price * tax_rate / 100`.
///
/// No rounding or clamping. Negative or absurd inputs pass straight through.
pub fn compute_total(base_price: f64, tax_rate: f64) -> f64 {
    base_price + base_price * tax_rate / 100.0
}

impl PriceRequest {
    /// Price this request.
    pub fn total(&self) -> PriceResponse {
        PriceResponse {
            total_price: compute_total(self.base_price, self.tax_rate),
        }
    }
}
