//! Outbound FX provider port.
//!
//! This trait defines the interface to the third-party exchange API.
//! Implementations can be HTTP clients, stub providers, etc.

use rust_decimal::Decimal;

use crate::domain::RateTable;
use crate::dto::ProviderConvertResponse;

/// Error type for provider calls. Covers transport failures, non-2xx
/// responses and undecodable bodies alike; callers treat all of them as one
/// terminal third-party failure.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    Transport(String),

    #[error("unexpected status code {0}")]
    Status(u16),

    #[error("{0}")]
    Decode(String),
}

/// Port trait for the third-party FX API.
///
/// Each call issues exactly one outbound request; there are no retries and
/// no timeouts beyond transport defaults. `Ok(None)` models a 2xx response
/// whose payload is a literal JSON `null`.
#[async_trait::async_trait]
pub trait FxProvider: Send + Sync + 'static {
    /// Converts `amount` of `base` into `target`.
    async fn convert(
        &self,
        base: &str,
        target: &str,
        amount: Decimal,
    ) -> Result<Option<ProviderConvertResponse>, ProviderError>;

    /// Fetches the full rate table for `base`.
    async fn rates(&self, base: &str) -> Result<Option<RateTable>, ProviderError>;
}
