//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use fx_types::{
    ConversionId, ConversionRecord, ConversionRepository, NewConversion, RepoError, time,
};

use crate::types::DbConversion;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_conversions_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

const SELECT_COLUMNS: &str = "id, base_currency, target_currency, amount, converted_amount, \
                              exchange_rate, last_exchange_rate_date, transaction_date";

#[async_trait]
impl ConversionRepository for PostgresRepo {
    async fn save(&self, new: NewConversion) -> Result<ConversionRecord, RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO conversions
               (base_currency, target_currency, amount, converted_amount, exchange_rate, last_exchange_rate_date, transaction_date)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(&new.base_currency)
        .bind(&new.target_currency)
        .bind(new.amount)
        .bind(new.converted_amount)
        .bind(new.exchange_rate)
        .bind(new.last_exchange_rate_date)
        .bind(new.transaction_date)
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(ConversionRecord::from_new(id, new))
    }

    async fn find_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError> {
        let row: Option<DbConversion> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM conversions WHERE id = $1"
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
             WHERE id = $1 AND transaction_date >= $2 AND transaction_date < $3"
        ))
        .bind(id)
        .bind(start)
        .bind(end)
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
             WHERE transaction_date >= $1 AND transaction_date < $2 \
             ORDER BY transaction_date DESC \
             LIMIT $3 OFFSET $4"
        ))
        .bind(start)
        .bind(end)
        .bind(size)
        .bind(page * size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbConversion::into_domain).collect()
    }
}
