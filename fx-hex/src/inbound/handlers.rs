//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;

use fx_types::{
    AppError, ConversionListQuery, ConversionRepository, ConvertRequest, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, ErrorMessage, FxProvider, dto::validate_currency_code,
};

use crate::{ConversionService, RateService};

/// Application state shared across handlers.
pub struct AppState<R: ConversionRepository, P: FxProvider> {
    pub conversions: ConversionService<R, P>,
    pub rates: RateService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, status_name) = match &self.0 {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::ThirdParty(_) => (StatusCode::EXPECTATION_FAILED, "EXPECTATION_FAILED"),
            AppError::ConversionNotFound(_) | AppError::RatesNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let body = ErrorMessage {
            error_code: status.as_u16(),
            error_status: status_name.to_string(),
            error_message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount between two currencies and persist the result.
#[tracing::instrument(skip(state, payload))]
pub async fn convert<R: ConversionRepository, P: FxProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    req.validate()?;

    let response = state.conversions.convert(req).await?;
    Ok(Json(response))
}

/// Query parameters of the conversion history endpoint.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionListParams {
    pub transaction_id: Option<i64>,
    pub transaction_date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// List past conversions by id, by day, or both.
#[tracing::instrument(skip(state, params))]
pub async fn list_conversions<R: ConversionRepository, P: FxProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    params: Result<Query<ConversionListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let query = ConversionListQuery {
        transaction_id: params.transaction_id,
        transaction_date: params.transaction_date,
        page: params.page.unwrap_or(DEFAULT_PAGE),
        size: params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    query.validate()?;

    let response = state.conversions.list(query).await?;
    Ok(Json(response))
}

/// Query parameters of the rates endpoint. Both are required; missing ones
/// get a dedicated message, so they are modelled as options here.
#[derive(Debug, serde::Deserialize)]
pub struct RateParams {
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Look up a single exchange rate.
#[tracing::instrument(skip(state, params))]
pub async fn get_rate<R: ConversionRepository, P: FxProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    params: Result<Query<RateParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let source = params
        .source
        .ok_or_else(|| AppError::BadRequest("source parameter is missing.".into()))?;
    let target = params
        .target
        .ok_or_else(|| AppError::BadRequest("target parameter is missing.".into()))?;

    validate_currency_code(&source, "Source")?;
    validate_currency_code(&target, "Target")?;

    let response = state.rates.rate(&source, &target).await?;
    Ok(Json(response))
}
