//! Persisted conversion records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Identifier assigned by the store on insert.
pub type ConversionId = i64;

/// A conversion that has not been persisted yet.
///
/// `transaction_date` is set exactly once, at creation, to the wall-clock
/// time of the conversion call. `last_exchange_rate_date` is absent when the
/// provider did not report a rate timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversion {
    pub base_currency: String,
    pub target_currency: String,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub exchange_rate: Decimal,
    pub last_exchange_rate_date: Option<DateTime<Utc>>,
    pub transaction_date: DateTime<Utc>,
}

/// A persisted conversion. Records are insert-only: once stored they are
/// never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    pub id: ConversionId,
    pub base_currency: String,
    pub target_currency: String,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub exchange_rate: Decimal,
    pub last_exchange_rate_date: Option<DateTime<Utc>>,
    pub transaction_date: DateTime<Utc>,
}

impl ConversionRecord {
    /// Attaches the store-assigned id to a pending conversion.
    pub fn from_new(id: ConversionId, new: NewConversion) -> Self {
        Self {
            id,
            base_currency: new.base_currency,
            target_currency: new.target_currency,
            amount: new.amount,
            converted_amount: new.converted_amount,
            exchange_rate: new.exchange_rate,
            last_exchange_rate_date: new.last_exchange_rate_date,
            transaction_date: new.transaction_date,
        }
    }
}
