//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::dto::{
    ConversionListResponse, ConvertRequest, ConvertResponse, ErrorMessage, ExchangeRateResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount between two currencies
#[utoipa::path(
    post,
    path = "/api/v1/convert",
    tag = "conversions",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion performed and persisted", body = ConvertResponse),
        (status = 400, description = "Invalid currency codes or negative amount", body = ErrorMessage),
        (status = 417, description = "Third-party provider call failed", body = ErrorMessage)
    )
)]
async fn convert() {}

/// List past conversions by transaction id and/or transaction date
#[utoipa::path(
    get,
    path = "/api/v1/conversions",
    tag = "conversions",
    params(
        ("transactionId" = Option<i64>, Query, description = "Conversion id to look up"),
        ("transactionDate" = Option<String>, Query, description = "Calendar day (yyyy-MM-dd, UTC) to list"),
        ("page" = Option<i64>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<i64>, Query, description = "Page size, default 10")
    ),
    responses(
        (status = 200, description = "Matching conversions, newest first", body = ConversionListResponse),
        (status = 400, description = "No filter given or pagination out of bounds", body = ErrorMessage),
        (status = 404, description = "No conversion matched the filters", body = ErrorMessage)
    )
)]
async fn list_conversions() {}

/// Fetch a single exchange rate
#[utoipa::path(
    get,
    path = "/api/v1/rates",
    tag = "rates",
    params(
        ("source" = String, Query, description = "Three-letter base currency code"),
        ("target" = String, Query, description = "Three-letter target currency code")
    ),
    responses(
        (status = 200, description = "Current rate from source to target", body = ExchangeRateResponse),
        (status = 400, description = "Missing or malformed currency codes", body = ErrorMessage),
        (status = 404, description = "Provider has no rate for the target currency", body = ErrorMessage),
        (status = 417, description = "Third-party provider call failed", body = ErrorMessage)
    )
)]
async fn get_rate() {}

/// OpenAPI documentation for the currency conversion API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Conversion Service API",
        version = "1.0.0",
        description = "A currency conversion service backed by a third-party foreign exchange provider. Performs conversions, persists each one, and serves paginated conversion history.",
        license(name = "MIT"),
    ),
    paths(health, convert, list_conversions, get_rate),
    components(
        schemas(
            ConvertRequest,
            ConvertResponse,
            ConversionListResponse,
            ExchangeRateResponse,
            ErrorMessage,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "conversions", description = "Currency conversion and history operations"),
        (name = "rates", description = "Exchange rate lookup"),
    )
)]
pub struct ApiDoc;
