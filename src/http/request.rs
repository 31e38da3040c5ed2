//! Request identification and path value parsing.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) when the client did not send one
//! - Echo the ID back on the response
//! - Parse numeric path segments, including ones that failed to decode
//!
//! # Design Decisions
//! - Request ID added as early as possible so every log line carries it
//! - A client-supplied `x-request-id` is kept as is
//! - Literal `inf`/`nan` are accepted, but a finite literal that overflows
//!   to infinity is rejected as out of range

use std::num::ParseFloatError;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of `request` as a string, or `"unknown"`.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Why a path segment is not a usable number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    #[error(transparent)]
    Syntax(#[from] ParseFloatError),

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("unreadable path segment: {0}")]
    Segment(String),
}

/// Parse the numeric path segment an extractor produced.
pub fn parse_segment(segment: Result<Path<String>, PathRejection>) -> Result<f64, NumberError> {
    let Path(text) = segment.map_err(|rejection| NumberError::Segment(rejection.body_text()))?;
    parse_number(&text)
}

/// Parse a numeric path segment as `f64`.
pub fn parse_number(text: &str) -> Result<f64, NumberError> {
    let value = text.parse::<f64>()?;
    if value.is_infinite() && !names_infinity(text) {
        return Err(NumberError::OutOfRange(text.to_string()));
    }
    Ok(value)
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
