//! # FX Repository
//!
//! History store adapters for the currency converter. Each adapter implements
//! the `HistoryStore` port:
//!
//! - `ClientSideHistory` - keeps nothing, history lives in the browser
//! - `SqliteHistory` - durable history in SQLite (`sqlite` feature)
//! - `PostgresHistory` - durable history in PostgreSQL (`postgres` feature)
//!
//! `build_history` picks one at startup from the configured database URL.

use async_trait::async_trait;
use fx_types::{ConversionRecord, History, HistoryStore, RepoError, StorageMode};

pub mod client_side;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

pub use client_side::ClientSideHistory;
#[cfg(feature = "postgres")]
pub use postgres::PostgresHistory;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteHistory;

/// Unified history store selected once at process start.
pub enum HistoryBackend {
    ClientSide(ClientSideHistory),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteHistory),
    #[cfg(feature = "postgres")]
    Postgres(PostgresHistory),
}

/// Build and initialize a history store.
///
/// - no URL: history stays with the client
/// - `sqlite:...`: SQLite (requires the `sqlite` feature)
/// - `postgres://...` / `postgresql://...`: PostgreSQL (requires the `postgres` feature)
///
/// Durable stores connect and create their schema before returning.
///
/// # Examples
///
/// ```ignore
/// let history = build_history(None).await?;
/// let history = build_history(Some("sqlite://data/history.db?mode=rwc")).await?;
/// ```
pub async fn build_history(database_url: Option<&str>) -> anyhow::Result<HistoryBackend> {
    let Some(url) = database_url else {
        return Ok(HistoryBackend::ClientSide(ClientSideHistory::new()));
    };

    if url.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        return Ok(HistoryBackend::Sqlite(SqliteHistory::new(url).await?));
        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!("DATABASE_URL is a SQLite URL but the `sqlite` feature is not enabled");
    }

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        #[cfg(feature = "postgres")]
        return Ok(HistoryBackend::Postgres(PostgresHistory::new(url).await?));
        #[cfg(not(feature = "postgres"))]
        anyhow::bail!("DATABASE_URL is a PostgreSQL URL but the `postgres` feature is not enabled");
    }

    anyhow::bail!("Unsupported DATABASE_URL scheme; expected sqlite: or postgres://")
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement HistoryStore for HistoryBackend (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryStore for HistoryBackend {
    fn mode(&self) -> StorageMode {
        match self {
            HistoryBackend::ClientSide(inner) => inner.mode(),
            #[cfg(feature = "sqlite")]
            HistoryBackend::Sqlite(inner) => inner.mode(),
            #[cfg(feature = "postgres")]
            HistoryBackend::Postgres(inner) => inner.mode(),
        }
    }

    async fn record(&self, entry: &ConversionRecord) -> Result<(), RepoError> {
        match self {
            HistoryBackend::ClientSide(inner) => inner.record(entry).await,
            #[cfg(feature = "sqlite")]
            HistoryBackend::Sqlite(inner) => inner.record(entry).await,
            #[cfg(feature = "postgres")]
            HistoryBackend::Postgres(inner) => inner.record(entry).await,
        }
    }

    async fn recent_history(&self, limit: u32) -> Result<History, RepoError> {
        match self {
            HistoryBackend::ClientSide(inner) => inner.recent_history(limit).await,
            #[cfg(feature = "sqlite")]
            HistoryBackend::Sqlite(inner) => inner.recent_history(limit).await,
            #[cfg(feature = "postgres")]
            HistoryBackend::Postgres(inner) => inner.recent_history(limit).await,
        }
    }
}
