//! Conversion store port trait.
//!
//! This is the persistence port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) implement this trait.

use chrono::NaiveDate;

use crate::domain::{ConversionId, ConversionRecord, NewConversion};
use crate::error::RepoError;

/// Store for persisted conversions.
///
/// Records are insert-only. Day filters compare against the UTC calendar day
/// of the record's transaction instant.
#[async_trait::async_trait]
pub trait ConversionRepository: Send + Sync + 'static {
    /// Persists a conversion and returns it with the store-assigned id.
    /// The write MUST be atomic.
    async fn save(&self, new: NewConversion) -> Result<ConversionRecord, RepoError>;

    /// Looks a conversion up by id.
    async fn find_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError>;

    /// Looks a conversion up by id, restricted to the given UTC day.
    async fn find_by_id_and_day(
        &self,
        id: ConversionId,
        day: NaiveDate,
    ) -> Result<Option<ConversionRecord>, RepoError>;

    /// Lists conversions made on the given UTC day, newest first.
    /// `page` is 0-based, `size` is items per page.
    async fn find_by_day(
        &self,
        day: NaiveDate,
        page: i64,
        size: i64,
    ) -> Result<Vec<ConversionRecord>, RepoError>;
}
