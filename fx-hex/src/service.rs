//! Application services.
//!
//! Orchestrate the provider and store ports. Contain NO infrastructure
//! logic - pure orchestration and field mapping.

use chrono::Utc;

use fx_types::{
    AppError, ConversionListQuery, ConversionListResponse, ConversionRepository, ConvertRequest,
    ConvertResponse, ExchangeRateResponse, FxProvider, NewConversion, time,
};

/// Conversion orchestration: convert-and-persist plus history retrieval.
///
/// Generic over the two ports - adapters are injected at compile time, which
/// lets tests run against in-memory fakes.
pub struct ConversionService<R: ConversionRepository, P: FxProvider> {
    repo: R,
    provider: P,
}

impl<R: ConversionRepository, P: FxProvider> ConversionService<R, P> {
    /// Creates a new conversion service over the given adapters.
    pub fn new(repo: R, provider: P) -> Self {
        Self { repo, provider }
    }

    /// Converts an amount via the provider and persists the result.
    ///
    /// The caller validates the request first; by the time we are here the
    /// currency codes and amount are well-formed.
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConvertResponse, AppError> {
        tracing::info!(
            source = %req.source_currency,
            target = %req.target_currency,
            amount = %req.amount,
            "starting conversion flow"
        );

        let payload = self
            .provider
            .convert(&req.source_currency, &req.target_currency, req.amount)
            .await?
            .ok_or_else(|| AppError::ThirdParty("Convert response object is null!".into()))?;

        let new = NewConversion {
            base_currency: payload.base,
            target_currency: payload.to,
            amount: payload.amount,
            converted_amount: payload.converted,
            exchange_rate: payload.rate,
            last_exchange_rate_date: payload
                .last_update
                .and_then(time::instant_from_provider_epoch),
            transaction_date: Utc::now(),
        };

        let record = self.repo.save(new).await?;
        tracing::info!(transaction_id = record.id, "conversion persisted");

        Ok(ConvertResponse::from_record(record))
    }

    /// Retrieves past conversions for one of the three filter modes:
    /// id + day, id only, or day only (paginated, newest first).
    ///
    /// Filter presence and pagination bounds are validated upstream by the
    /// HTTP surface.
    pub async fn list(
        &self,
        query: ConversionListQuery,
    ) -> Result<ConversionListResponse, AppError> {
        tracing::info!(?query, "listing conversions");

        let records: Vec<_> = match (query.transaction_id, query.transaction_date) {
            (Some(id), Some(day)) => self
                .repo
                .find_by_id_and_day(id, day)
                .await?
                .into_iter()
                .collect(),
            (Some(id), None) => self.repo.find_by_id(id).await?.into_iter().collect(),
            (None, Some(day)) => self.repo.find_by_day(day, query.page, query.size).await?,
            (None, None) => {
                return Err(AppError::BadRequest(
                    "transactionId and transactionDate null or empty, least one of the these inputs required!".into(),
                ));
            }
        };

        if records.is_empty() {
            return Err(AppError::ConversionNotFound("Conversion not found!".into()));
        }

        Ok(ConversionListResponse {
            conversions: records
                .into_iter()
                .map(ConvertResponse::from_record)
                .collect(),
        })
    }
}

/// Rate lookup: fetches the provider's rate table for a base currency and
/// extracts the single requested target rate.
pub struct RateService<P: FxProvider> {
    provider: P,
}

impl<P: FxProvider> RateService<P> {
    /// Creates a new rate service over the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the rate from `source` to `target`.
    pub async fn rate(&self, source: &str, target: &str) -> Result<ExchangeRateResponse, AppError> {
        tracing::info!(source, target, "starting exchange rate flow");

        let table = self
            .provider
            .rates(source)
            .await?
            .ok_or_else(|| AppError::ThirdParty("Rates response object is null!".into()))?;

        let rate = table
            .rate_for(target)
            .ok_or_else(|| AppError::RatesNotFound("Target currency rate not found!".into()))?;

        Ok(ExchangeRateResponse {
            source_currency: table.base,
            target_currency: target.to_string(),
            rate_amount: rate,
        })
    }
}
