//! # FX Provider
//!
//! Outbound adapter for the third-party foreign exchange API. Implements the
//! `FxProvider` port over plain HTTP GET calls authenticated with a static
//! API key. One request per invocation; no retries, no timeout configuration
//! beyond transport defaults.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use fx_types::{FxProvider, ProviderConvertResponse, ProviderError, RateTable};

/// Endpoint prefix of the hosted provider. Overridable for tests and
/// self-hosted stubs.
pub const DEFAULT_BASE_URL: &str = "https://anyapi.io/api/v1/exchange";

/// Live HTTP implementation of the `FxProvider` port.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection
/// pool across clones.
#[derive(Clone)]
pub struct HttpFxProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpFxProvider {
    /// Creates a provider against the given endpoint prefix.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Creates a provider against the hosted endpoint.
    pub fn hosted(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    fn convert_url(&self, base: &str, target: &str, amount: Decimal) -> String {
        format!(
            "{}/convert?base={base}&to={target}&amount={amount}&apiKey={}",
            self.base_url, self.api_key
        )
    }

    fn rates_url(&self, base: &str) -> String {
        format!("{}/rates?base={base}&apiKey={}", self.base_url, self.api_key)
    }

    /// Issues one GET and decodes the body. A 2xx `null` body decodes to
    /// `None`; anything else that fails maps onto a `ProviderError`.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<Option<T>, ProviderError> {
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        resp.json::<Option<T>>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FxProvider for HttpFxProvider {
    async fn convert(
        &self,
        base: &str,
        target: &str,
        amount: Decimal,
    ) -> Result<Option<ProviderConvertResponse>, ProviderError> {
        tracing::debug!(base, target, %amount, "calling provider convert");
        self.get_json(self.convert_url(base, target, amount)).await
    }

    async fn rates(&self, base: &str) -> Result<Option<RateTable>, ProviderError> {
        tracing::debug!(base, "calling provider rates");
        self.get_json(self.rates_url(base)).await
    }
}
