//! Shared database row types with feature-gated fields for SQLite and
//! PostgreSQL.

use sqlx::FromRow;

use fx_types::{ConversionRecord, RepoError};

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use rust_decimal::Decimal;

/// Conversion row from the database. SQLite stores decimals and instants as
/// text; Postgres maps them natively.
#[derive(FromRow)]
pub struct DbConversion {
    pub id: i64,
    pub base_currency: String,
    pub target_currency: String,

    #[cfg(not(feature = "sqlite"))]
    pub amount: Decimal,
    #[cfg(feature = "sqlite")]
    pub amount: String,

    #[cfg(not(feature = "sqlite"))]
    pub converted_amount: Decimal,
    #[cfg(feature = "sqlite")]
    pub converted_amount: String,

    #[cfg(not(feature = "sqlite"))]
    pub exchange_rate: Decimal,
    #[cfg(feature = "sqlite")]
    pub exchange_rate: String,

    #[cfg(not(feature = "sqlite"))]
    pub last_exchange_rate_date: Option<DateTime<Utc>>,
    #[cfg(feature = "sqlite")]
    pub last_exchange_rate_date: Option<String>,

    #[cfg(not(feature = "sqlite"))]
    pub transaction_date: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub transaction_date: String,
}

#[cfg(feature = "sqlite")]
fn parse_decimal(s: &str) -> Result<rust_decimal::Decimal, RepoError> {
    use std::str::FromStr;
    rust_decimal::Decimal::from_str(s).map_err(|e| RepoError::Database(e.to_string()))
}

#[cfg(feature = "sqlite")]
fn parse_instant(s: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| RepoError::Database(e.to_string()))
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

impl DbConversion {
    /// Convert database row to a domain record.
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let (amount, converted_amount, exchange_rate, last_exchange_rate_date, transaction_date) = (
            self.amount,
            self.converted_amount,
            self.exchange_rate,
            self.last_exchange_rate_date,
            self.transaction_date,
        );

        #[cfg(feature = "sqlite")]
        let (amount, converted_amount, exchange_rate, last_exchange_rate_date, transaction_date) = (
            parse_decimal(&self.amount)?,
            parse_decimal(&self.converted_amount)?,
            parse_decimal(&self.exchange_rate)?,
            self.last_exchange_rate_date
                .as_deref()
                .map(parse_instant)
                .transpose()?,
            parse_instant(&self.transaction_date)?,
        );

        Ok(ConversionRecord {
            id: self.id,
            base_currency: self.base_currency,
            target_currency: self.target_currency,
            amount,
            converted_amount,
            exchange_rate,
            last_exchange_rate_date,
            transaction_date,
        })
    }
}
