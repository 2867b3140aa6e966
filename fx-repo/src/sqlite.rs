//! SQLite repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use fx_types::{
    ConversionId, ConversionRecord, ConversionRepository, NewConversion, RepoError, time,
};

use crate::types::DbConversion;

/// Fixed-width RFC 3339 UTC rendering, so lexicographic order on the stored
/// text equals chronological order.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self::with_pool(pool);
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Wraps an existing pool (used by tests).
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_conversions.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

const SELECT_COLUMNS: &str = "id, base_currency, target_currency, amount, converted_amount, \
                              exchange_rate, last_exchange_rate_date, transaction_date";

#[async_trait]
impl ConversionRepository for SqliteRepo {
    async fn save(&self, new: NewConversion) -> Result<ConversionRecord, RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        let result = sqlx::query(
            r#"INSERT INTO conversions
               (base_currency, target_currency, amount, converted_amount, exchange_rate, last_exchange_rate_date, transaction_date)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&new.base_currency)
        .bind(&new.target_currency)
        .bind(new.amount.to_string())
        .bind(new.converted_amount.to_string())
        .bind(new.exchange_rate.to_string())
        .bind(new.last_exchange_rate_date.map(format_instant))
        .bind(format_instant(new.transaction_date))
        .execute(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(ConversionRecord::from_new(id, new))
    }

    async fn find_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError> {
        let row: Option<DbConversion> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM conversions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbConversion::into_domain).transpose()
    }

    async fn find_by_id_and_day(
        &self,
        id: ConversionId,
        day: NaiveDate,
    ) -> Result<Option<ConversionRecord>, RepoError> {
        let (start, end) = time::utc_day_bounds(day);

        let row: Option<DbConversion> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM conversions \
             WHERE id = ? AND transaction_date >= ? AND transaction_date < ?"
        ))
        .bind(id)
        .bind(format_instant(start))
        .bind(format_instant(end))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbConversion::into_domain).transpose()
    }

    async fn find_by_day(
        &self,
        day: NaiveDate,
        page: i64,
        size: i64,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let (start, end) = time::utc_day_bounds(day);

        let rows: Vec<DbConversion> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM conversions \
             WHERE transaction_date >= ? AND transaction_date < ? \
             ORDER BY transaction_date DESC \
             LIMIT ? OFFSET ?"
        ))
        .bind(format_instant(start))
        .bind(format_instant(end))
        .bind(size)
        .bind(page * size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbConversion::into_domain).collect()
    }
}
