//! Pricing data types.

use serde::{Deserialize, Serialize, Serializer};

/// The mutable pricing configuration held by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSettings {
    /// Price before tax.
    pub base_price: f64,
    /// Tax rate as a percentage (20.0 means 20%).
    pub tax_rate: f64,
}

/// Input to a total price computation.
///
/// Always built from the stored [`PriceSettings`] at call time, never from the
/// client's request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub base_price: f64,
    pub tax_rate: f64,
}

impl From<PriceSettings> for PriceRequest {
    fn from(settings: PriceSettings) -> Self {
        Self {
            base_price: settings.base_price,
            tax_rate: settings.tax_rate,
        }
    }
}

/// Response body for `POST /calculate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    /// Base price plus tax. Serialization fails if this is not finite.
    #[serde(serialize_with = "finite_f64")]
    pub total_price: f64,
}

/// Confirmation body for the setter endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON has no NaN or infinity, so refuse to emit them instead of writing `null`.
fn finite_f64<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(serde::ser::Error::custom(format!(
            "unsupported value: {value}"
        )))
    }
}
