//! Pricing endpoint handlers.
//!
//! Each handler runs inside a span from the injected [`SpanReporter`] and
//! touches the shared [`ConfigStore`] only through its snapshot/setter API.
//!
//! [`SpanReporter`]: crate::observability::SpanReporter
//! [`ConfigStore`]: crate::pricing::ConfigStore

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use tracing::{Instrument, Span};

use crate::http::request::parse_segment;
use crate::http::response::{json_ok, ApiError};
use crate::http::server::AppState;
use crate::observability::{record_error, Operation};
use crate::pricing::{MessageResponse, PriceRequest};

/// `POST /calculate`
///
/// The request body is never read: the total always comes from the stored
/// base price and tax rate.
pub async fn calculate_price(State(state): State<AppState>) -> Result<Response, ApiError> {
    let span = state.reporter.span(Operation::CalculatePrice);

    let result = async move {
        let request = PriceRequest::from(state.store.get());

        let response = async {
            if !state.processing_delay.is_zero() {
                tokio::time::sleep(state.processing_delay).await;
            }
            request.total()
        }
        .instrument(state.reporter.span(Operation::CalculateTotalPrice))
        .await;

        let encoded = json_ok(&response)?;
        tracing::info!(
            base_price = request.base_price,
            tax_rate = request.tax_rate,
            total_price = response.total_price,
            "Calculated total price"
        );
        Ok::<_, ApiError>(encoded)
    }
    .instrument(span.clone())
    .await;

    finish(&span, result)
}

/// `POST /setBasePrice/{value}`
pub async fn set_base_price(
    State(state): State<AppState>,
    segment: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let span = state.reporter.span(Operation::SetBasePrice);

    let result = span.in_scope(|| -> Result<Response, ApiError> {
        let base_price = parse_segment(segment).map_err(ApiError::InvalidBasePrice)?;
        state.store.set_base_price(base_price);

        let encoded = json_ok(&MessageResponse::new("Base price set"))?;
        tracing::info!(base_price, "Base price set");
        Ok(encoded)
    });

    finish(&span, result)
}

/// `POST /setTaxRate/{value}`
pub async fn set_tax_rate(
    State(state): State<AppState>,
    segment: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let span = state.reporter.span(Operation::SetTaxRate);

    let result = span.in_scope(|| -> Result<Response, ApiError> {
        let tax_rate = parse_segment(segment).map_err(ApiError::InvalidTaxRate)?;
        state.store.set_tax_rate(tax_rate);

        let encoded = json_ok(&MessageResponse::new("Tax rate set"))?;
        tracing::info!(tax_rate, "Tax rate set");
        Ok(encoded)
    });

    finish(&span, result)
}

/// Flag server-side failures on the operation span before it closes.
fn finish(span: &Span, result: Result<Response, ApiError>) -> Result<Response, ApiError> {
    if let Err(e) = &result {
        if e.status().is_server_error() {
            record_error(span);
        }
    }
    result
}
