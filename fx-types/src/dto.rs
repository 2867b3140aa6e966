//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Everything that crosses the HTTP boundary is camelCase on the wire.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ConversionRecord;
use crate::error::AppError;
use crate::time;

/// Default page number for conversion history queries.
pub const DEFAULT_PAGE: i64 = 0;
/// Default page size for conversion history queries.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Checks that a currency code is non-blank and exactly three characters.
/// `name` is "Source" or "Target" and only feeds the error message.
pub fn validate_currency_code(value: &str, name: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!(
            "{name} currency name must be filled!"
        )));
    }
    if value.chars().count() != 3 {
        return Err(AppError::BadRequest(format!(
            "{name} currency name length must be 3!"
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Three-letter source currency code
    #[schema(example = "EUR")]
    pub source_currency: String,
    /// Three-letter target currency code
    #[schema(example = "TRY")]
    pub target_currency: String,
    /// Amount in source currency, must be zero or positive
    #[schema(value_type = f64, example = 10)]
    pub amount: Decimal,
}

impl ConvertRequest {
    /// Validates the request before any outbound call is made.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_currency_code(&self.source_currency, "Source")?;
        validate_currency_code(&self.target_currency, "Target")?;
        if self.amount < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "Cannot be calculated for amount less than zero!".into(),
            ));
        }
        Ok(())
    }
}

/// One conversion, as returned by the convert endpoint and in history
/// listings. Instants are formatted `yyyy-MM-dd HH:mm:ss` in local time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Store-assigned conversion id
    #[schema(example = 1)]
    pub transaction_id: i64,
    /// When the conversion was made
    #[schema(example = "2024-05-17 09:30:15")]
    pub transaction_date: String,
    #[schema(example = "EUR")]
    pub source_currency: String,
    #[schema(example = "TRY")]
    pub target_currency: String,
    /// Amount requested, in source currency
    #[schema(value_type = f64, example = 10)]
    pub amount: Decimal,
    /// Rate the provider applied
    #[schema(value_type = f64, example = 10)]
    pub exchange_rate: Decimal,
    /// Amount in target currency
    #[schema(value_type = f64, example = 100)]
    pub converted_amount: Decimal,
    /// Provider-reported rate timestamp, null when the provider omitted it
    #[schema(example = "2024-05-17 09:00:00")]
    pub last_exchange_rate_date: Option<String>,
}

impl ConvertResponse {
    /// Maps a persisted record to its wire shape.
    pub fn from_record(record: ConversionRecord) -> Self {
        Self {
            transaction_id: record.id,
            transaction_date: time::format_local(record.transaction_date),
            source_currency: record.base_currency,
            target_currency: record.target_currency,
            amount: record.amount,
            exchange_rate: record.exchange_rate,
            converted_amount: record.converted_amount,
            last_exchange_rate_date: record.last_exchange_rate_date.map(time::format_local),
        }
    }
}

/// Filters for the conversion history endpoint. At least one of
/// `transaction_id` / `transaction_date` must be present.
#[derive(Debug, Clone)]
pub struct ConversionListQuery {
    pub transaction_id: Option<i64>,
    pub transaction_date: Option<NaiveDate>,
    pub page: i64,
    pub size: i64,
}

impl ConversionListQuery {
    /// Validates filter presence and pagination bounds. Runs before any
    /// store access.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.transaction_id.is_none() && self.transaction_date.is_none() {
            return Err(AppError::BadRequest(
                "transactionId and transactionDate null or empty, least one of the these inputs required!".into(),
            ));
        }
        if self.page < 0 {
            return Err(AppError::BadRequest("Page must be 0 or greater!".into()));
        }
        if self.size < 1 {
            return Err(AppError::BadRequest("Size must be 1 or greater!".into()));
        }
        Ok(())
    }
}

/// Conversion history listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionListResponse {
    pub conversions: Vec<ConvertResponse>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Single exchange rate, as returned by the rates endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponse {
    #[schema(example = "EUR")]
    pub source_currency: String,
    #[schema(example = "TRY")]
    pub target_currency: String,
    /// How many units of target one unit of source buys
    #[schema(value_type = f64, example = 10)]
    pub rate_amount: Decimal,
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider wire shapes
// ─────────────────────────────────────────────────────────────────────────────

/// Convert response as the third-party provider emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConvertResponse {
    pub base: String,
    pub to: String,
    pub amount: Decimal,
    pub converted: Decimal,
    pub rate: Decimal,
    /// Epoch value of the rate the provider applied; normally 10-digit
    /// seconds, occasionally absent
    #[serde(default)]
    pub last_update: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error body
// ─────────────────────────────────────────────────────────────────────────────

/// Body shape shared by every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    /// Numeric HTTP status
    #[schema(example = 400)]
    pub error_code: u16,
    /// Status name, e.g. BAD_REQUEST
    #[schema(example = "BAD_REQUEST")]
    pub error_status: String,
    /// Human-readable cause
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(source: &str, target: &str, amount: i64) -> ConvertRequest {
        ConvertRequest {
            source_currency: source.to_string(),
            target_currency: target.to_string(),
            amount: Decimal::from(amount),
        }
    }

    #[test]
    fn valid_convert_request_passes() {
        assert!(request("EUR", "TRY", 10).validate().is_ok());
        assert!(request("EUR", "TRY", 0).validate().is_ok());
    }

    #[test]
    fn blank_source_currency_is_rejected() {
        let err = request("   ", "TRY", 10).validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Source currency name must be filled!"
        ));
    }

    #[test]
    fn wrong_length_target_currency_is_rejected() {
        let err = request("EUR", "TRYX", 10).validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Target currency name length must be 3!"
        ));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = request("EUR", "TRY", -1).validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Cannot be calculated for amount less than zero!"
        ));
    }

    #[test]
    fn list_query_requires_a_filter() {
        let query = ConversionListQuery {
            transaction_id: None,
            transaction_date: None,
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        };
        let err = query.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg)
                if msg == "transactionId and transactionDate null or empty, least one of the these inputs required!"
        ));
    }

    #[test]
    fn list_query_rejects_bad_pagination() {
        let mut query = ConversionListQuery {
            transaction_id: Some(1),
            transaction_date: None,
            page: -1,
            size: 10,
        };
        assert!(matches!(
            query.validate().unwrap_err(),
            AppError::BadRequest(msg) if msg == "Page must be 0 or greater!"
        ));

        query.page = 0;
        query.size = 0;
        assert!(matches!(
            query.validate().unwrap_err(),
            AppError::BadRequest(msg) if msg == "Size must be 1 or greater!"
        ));
    }

    #[test]
    fn provider_convert_response_deserializes() {
        let json =
            r#"{"base":"EUR","to":"TRY","amount":10,"converted":100,"rate":10,"lastUpdate":1653638400}"#;
        let resp: ProviderConvertResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.base, "EUR");
        assert_eq!(resp.to, "TRY");
        assert_eq!(resp.rate, Decimal::from(10));
        assert_eq!(resp.last_update, Some(1_653_638_400));
    }
}
