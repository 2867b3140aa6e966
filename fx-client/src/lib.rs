//! # FX Client SDK
//!
//! A typed Rust client for the currency conversion API.

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use fx_types::{ConversionListResponse, ConvertRequest, ConvertResponse, ExchangeRateResponse};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency conversion API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts an amount from `source` to `target`. The server persists the
    /// conversion and returns it with its assigned transaction id.
    pub async fn convert(
        &self,
        source: &str,
        target: &str,
        amount: Decimal,
    ) -> Result<ConvertResponse, ClientError> {
        let req = ConvertRequest {
            source_currency: source.to_string(),
            target_currency: target.to_string(),
            amount,
        };
        self.post("/api/v1/convert", &req).await
    }

    /// Retrieves past conversions. At least one of `transaction_id` /
    /// `transaction_date` must be given; pagination applies to date-only
    /// queries.
    pub async fn conversions(
        &self,
        transaction_id: Option<i64>,
        transaction_date: Option<NaiveDate>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<ConversionListResponse, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = transaction_id {
            params.push(("transactionId", id.to_string()));
        }
        if let Some(day) = transaction_date {
            params.push(("transactionDate", day.to_string()));
        }
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = size {
            params.push(("size", size.to_string()));
        }

        let resp = self
            .http
            .get(format!("{}/api/v1/conversions", self.base_url))
            .query(&params)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Fetches the current rate from `source` to `target`.
    pub async fn rate(
        &self,
        source: &str,
        target: &str,
    ) -> Result<ExchangeRateResponse, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/v1/rates", self.base_url))
            .query(&[("source", source), ("target", target)])
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("errorMessage")
                        .and_then(|e| e.as_str())
                        .map(String::from)
                })
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FxClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = FxClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
