//! Integration tests for the HTTP surface.
//!
//! Each test builds the full router over an in-memory SQLite store and a
//! scripted provider, then drives it with `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use fx_hex::{ConversionService, RateService, inbound::HttpServer};
use fx_repo::SqliteRepo;
use fx_types::{FxProvider, ProviderError, RateTable, dto::ProviderConvertResponse};

/// Scripted provider: replays one payload per endpoint, or fails.
#[derive(Clone, Default)]
struct StubProvider {
    convert: Option<ProviderConvertResponse>,
    rates: Option<RateTable>,
    failure: Option<String>,
}

#[async_trait]
impl FxProvider for StubProvider {
    async fn convert(
        &self,
        _base: &str,
        _target: &str,
        _amount: Decimal,
    ) -> Result<Option<ProviderConvertResponse>, ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::Transport(message.clone())),
            None => Ok(self.convert.clone()),
        }
    }

    async fn rates(&self, _base: &str) -> Result<Option<RateTable>, ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::Transport(message.clone())),
            None => Ok(self.rates.clone()),
        }
    }
}

fn converting_provider() -> StubProvider {
    StubProvider {
        convert: Some(ProviderConvertResponse {
            base: "EUR".to_string(),
            to: "TRY".to_string(),
            amount: Decimal::from(10),
            converted: Decimal::from(100),
            rate: Decimal::from(10),
            last_update: Some(1_653_638_400),
        }),
        ..StubProvider::default()
    }
}

fn rates_provider() -> StubProvider {
    StubProvider {
        rates: Some(RateTable {
            last_update: Some(1_653_638_400),
            base: "EUR".to_string(),
            rates: HashMap::from([("TRY".to_string(), Decimal::from(10))]),
        }),
        ..StubProvider::default()
    }
}

fn failing_provider() -> StubProvider {
    StubProvider {
        failure: Some("connection refused".to_string()),
        ..StubProvider::default()
    }
}

/// Single-connection pool: every handle must see the same in-memory database.
async fn app(provider: StubProvider) -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    let repo = SqliteRepo::with_pool(pool);
    repo.create_schema().await.unwrap();

    let conversions = ConversionService::new(repo, provider.clone());
    let rates = RateService::new(provider);
    HttpServer::new(conversions, rates).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_convert(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/convert")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn decimal_field(json: &serde_json::Value, field: &str) -> Decimal {
    Decimal::from_str(json[field].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = app(StubProvider::default()).await;

    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn convert_end_to_end() {
    let app = app(converting_provider()).await;

    let (status, json) = send(
        &app,
        post_convert(r#"{"sourceCurrency":"EUR","targetCurrency":"TRY","amount":10}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transactionId"], 1);
    assert_eq!(json["sourceCurrency"], "EUR");
    assert_eq!(json["targetCurrency"], "TRY");
    assert_eq!(decimal_field(&json, "amount"), Decimal::from(10));
    assert_eq!(decimal_field(&json, "exchangeRate"), Decimal::from(10));
    assert_eq!(decimal_field(&json, "convertedAmount"), Decimal::from(100));
    assert!(json["transactionDate"].is_string());
    assert!(json["lastExchangeRateDate"].is_string());
}

#[tokio::test]
async fn convert_rejects_invalid_input() {
    let app = app(converting_provider()).await;

    let (status, json) = send(
        &app,
        post_convert(r#"{"sourceCurrency":" ","targetCurrency":"TRY","amount":10}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorCode"], 400);
    assert_eq!(json["errorStatus"], "BAD_REQUEST");
    assert_eq!(json["errorMessage"], "Source currency name must be filled!");

    let (status, json) = send(
        &app,
        post_convert(r#"{"sourceCurrency":"EUR","targetCurrency":"TURKISH","amount":10}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["errorMessage"],
        "Target currency name length must be 3!"
    );

    let (status, json) = send(
        &app,
        post_convert(r#"{"sourceCurrency":"EUR","targetCurrency":"TRY","amount":-1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["errorMessage"],
        "Cannot be calculated for amount less than zero!"
    );
}

#[tokio::test]
async fn convert_surfaces_provider_failure_as_417() {
    let app = app(failing_provider()).await;

    let (status, json) = send(
        &app,
        post_convert(r#"{"sourceCurrency":"EUR","targetCurrency":"TRY","amount":10}"#),
    )
    .await;

    assert_eq!(status, StatusCode::EXPECTATION_FAILED);
    assert_eq!(json["errorCode"], 417);
    assert_eq!(json["errorStatus"], "EXPECTATION_FAILED");
    assert!(
        json["errorMessage"]
            .as_str()
            .unwrap()
            .starts_with("Exception occurred when call third party service.")
    );
}

#[tokio::test]
async fn conversions_listing_by_id() {
    let app = app(converting_provider()).await;

    let body = r#"{"sourceCurrency":"EUR","targetCurrency":"TRY","amount":10}"#;
    send(&app, post_convert(body)).await;
    send(&app, post_convert(body)).await;

    let (status, json) = send(&app, get("/api/v1/conversions?transactionId=1")).await;

    assert_eq!(status, StatusCode::OK);
    let conversions = json["conversions"].as_array().unwrap();
    assert_eq!(conversions.len(), 1);
    assert_eq!(conversions[0]["transactionId"], 1);
}

#[tokio::test]
async fn conversions_listing_requires_a_filter() {
    let app = app(StubProvider::default()).await;

    let (status, json) = send(&app, get("/api/v1/conversions")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["errorMessage"],
        "transactionId and transactionDate null or empty, least one of the these inputs required!"
    );
}

#[tokio::test]
async fn conversions_listing_rejects_bad_pagination() {
    let app = app(StubProvider::default()).await;

    let (status, json) = send(
        &app,
        get("/api/v1/conversions?transactionDate=2024-05-17&page=-1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorMessage"], "Page must be 0 or greater!");

    let (status, json) = send(
        &app,
        get("/api/v1/conversions?transactionDate=2024-05-17&size=0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorMessage"], "Size must be 1 or greater!");
}

#[tokio::test]
async fn conversions_listing_without_match_is_404() {
    let app = app(StubProvider::default()).await;

    let (status, json) = send(&app, get("/api/v1/conversions?transactionId=42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errorCode"], 404);
    assert_eq!(json["errorStatus"], "NOT_FOUND");
    assert_eq!(json["errorMessage"], "Conversion not found!");
}

#[tokio::test]
async fn rates_end_to_end() {
    let app = app(rates_provider()).await;

    let (status, json) = send(&app, get("/api/v1/rates?source=EUR&target=TRY")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sourceCurrency"], "EUR");
    assert_eq!(json["targetCurrency"], "TRY");
    assert_eq!(decimal_field(&json, "rateAmount"), Decimal::from(10));
}

#[tokio::test]
async fn rates_reports_missing_parameters() {
    let app = app(rates_provider()).await;

    let (status, json) = send(&app, get("/api/v1/rates?target=TRY")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorMessage"], "source parameter is missing.");

    let (status, json) = send(&app, get("/api/v1/rates?source=EUR")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errorMessage"], "target parameter is missing.");
}

#[tokio::test]
async fn rates_without_target_rate_is_404() {
    let app = app(rates_provider()).await;

    let (status, json) = send(&app, get("/api/v1/rates?source=EUR&target=USD")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errorMessage"], "Target currency rate not found!");
}
