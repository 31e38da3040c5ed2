//! HTTP client for the price calculator API.

use std::fmt::Display;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::pricing::{MessageResponse, PriceResponse};

/// Errors returned by [`PriceClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status for errors the server answered with.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin wrapper around the three pricing endpoints.
#[derive(Debug, Clone)]
pub struct PriceClient {
    client: Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `POST /calculate`
    pub async fn calculate(&self) -> Result<PriceResponse, ClientError> {
        self.post("/calculate").await
    }

    /// `POST /setBasePrice/{value}`. `value` is sent verbatim.
    pub async fn set_base_price(&self, value: impl Display) -> Result<MessageResponse, ClientError> {
        self.post(&format!("/setBasePrice/{}", value)).await
    }

    /// `POST /setTaxRate/{value}`. `value` is sent verbatim.
    pub async fn set_tax_rate(&self, value: impl Display) -> Result<MessageResponse, ClientError> {
        self.post(&format!("/setTaxRate/{}", value)).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
