//! Error types for the foreign exchange service.

use crate::ports::ProviderError;

/// Fixed prefix prepended to the underlying message whenever the outbound
/// provider call fails.
pub const THIRD_PARTY_ERROR_PREFIX: &str =
    "Exception occurred when call third party service. Exception message: ";

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

/// Application-level errors (for HTTP responses).
///
/// A closed taxonomy mapped to HTTP status at the boundary:
/// BadRequest -> 400, ThirdParty -> 417, the two NotFound variants -> 404,
/// Internal -> 500. All errors are terminal per request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ThirdParty(String),

    #[error("{0}")]
    ConversionNotFound(String),

    #[error("{0}")]
    RatesNotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::ThirdParty(format!("{THIRD_PARTY_ERROR_PREFIX}{err}"))
    }
}
