//! SQLite history adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::SecondsFormat;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use fx_types::{ConversionRecord, History, HistoryStore, RepoError, StorageMode};

use crate::types::SqliteConversionRow;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite History
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite-backed conversion history.
pub struct SqliteHistory {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &SqlitePool, sql: &str, name: &str) -> anyhow::Result<()> {
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

impl SqliteHistory {
    /// Connects and creates the schema if needed.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        // Ensure on-disk SQLite target directory exists.
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Each in-memory connection is its own database, so keep exactly one alive.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_conversions.sql"),
            "0001",
        )
        .await?;

        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryStore for SqliteHistory {
    fn mode(&self) -> StorageMode {
        StorageMode::Sqlite
    }

    async fn record(&self, entry: &ConversionRecord) -> Result<(), RepoError> {
        // Fixed-width UTC timestamps so text ordering matches time ordering.
        let created_at = entry.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true);

        sqlx::query(
            r#"INSERT INTO conversions (id, from_currency, to_currency, amount, result, exchange_rate, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(entry.id.to_string())
        .bind(&entry.from_currency)
        .bind(&entry.to_currency)
        .bind(entry.amount)
        .bind(entry.result)
        .bind(entry.exchange_rate.value())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn recent_history(&self, limit: u32) -> Result<History, RepoError> {
        let rows: Vec<SqliteConversionRow> = sqlx::query_as(
            r#"SELECT id, from_currency, to_currency, amount, result, exchange_rate, created_at
               FROM conversions
               ORDER BY created_at DESC, seq DESC
               LIMIT ?"#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let records = rows
            .into_iter()
            .map(SqliteConversionRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(History::Records(records))
    }
}
