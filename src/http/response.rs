//! Response encoding and error mapping.
//!
//! # Responsibilities
//! - Encode JSON bodies explicitly so encoding failures are observable
//! - Map handler errors to status codes and plain-text bodies
//!
//! # Design Decisions
//! - Error bodies are plain text, success bodies are JSON
//! - Every error is logged once, where it becomes a response

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::request::NumberError;

/// Errors a pricing handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base price: {0}")]
    InvalidBasePrice(#[source] NumberError),

    #[error("invalid tax rate: {0}")]
    InvalidTaxRate(#[source] NumberError),

    #[error("error encoding response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBasePrice(_) | ApiError::InvalidTaxRate(_) => StatusCode::BAD_REQUEST,
            ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client. Parse details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::InvalidBasePrice(_) => "Invalid base price",
            ApiError::InvalidTaxRate(_) => "Invalid tax rate",
            ApiError::Encode(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }
        (status, self.public_message()).into_response()
    }
}

/// Serialize `value` into a `200 OK` JSON response.
pub fn json_ok<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}
