//! PostgreSQL history adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use fx_types::{ConversionRecord, History, HistoryStore, RepoError, StorageMode};

use crate::types::PgConversionRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL History
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL-backed conversion history.
pub struct PostgresHistory {
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

impl PostgresHistory {
    /// Connects and creates the schema if needed.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_conversions_pg.sql"),
            "0001",
        )
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl HistoryStore for PostgresHistory {
    fn mode(&self) -> StorageMode {
        StorageMode::Postgres
    }

    async fn record(&self, entry: &ConversionRecord) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO conversions (id, from_currency, to_currency, amount, result, exchange_rate, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(entry.id.into_uuid())
        .bind(&entry.from_currency)
        .bind(&entry.to_currency)
        .bind(entry.amount)
        .bind(entry.result)
        .bind(entry.exchange_rate.value())
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn recent_history(&self, limit: u32) -> Result<History, RepoError> {
        let rows: Vec<PgConversionRow> = sqlx::query_as(
            r#"SELECT id, from_currency, to_currency, amount, result, exchange_rate, created_at
               FROM conversions
               ORDER BY created_at DESC, seq DESC
               LIMIT $1"#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let records = rows
            .into_iter()
            .map(PgConversionRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(History::Records(records))
    }
}
