//! Database row types for the SQL history adapters.

use sqlx::FromRow;

use fx_types::{ConversionId, ConversionRecord, ExchangeRate, RepoError};

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};
#[cfg(feature = "postgres")]
use uuid::Uuid;

fn stored_rate(value: f64) -> Result<ExchangeRate, RepoError> {
    ExchangeRate::new(value).map_err(|e| RepoError::InvalidRow(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows (ids and timestamps stored as text)
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row from SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteConversionRow {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: f64,
    pub exchange_rate: f64,
    pub created_at: String,
}

#[cfg(feature = "sqlite")]
impl SqliteConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        let id: ConversionId = self
            .id
            .parse()
            .map_err(|e| RepoError::InvalidRow(format!("id {}: {}", self.id, e)))?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::InvalidRow(format!("created_at {}: {}", self.created_at, e)))?
            .with_timezone(&chrono::Utc);

        Ok(ConversionRecord {
            id,
            from_currency: self.from_currency,
            to_currency: self.to_currency,
            amount: self.amount,
            result: self.result,
            exchange_rate: stored_rate(self.exchange_rate)?,
            timestamp,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows (native UUID and TIMESTAMPTZ)
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgConversionRow {
    pub id: Uuid,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: f64,
    pub exchange_rate: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "postgres")]
impl PgConversionRow {
    pub fn into_domain(self) -> Result<ConversionRecord, RepoError> {
        Ok(ConversionRecord {
            id: ConversionId::from_uuid(self.id),
            from_currency: self.from_currency,
            to_currency: self.to_currency,
            amount: self.amount,
            result: self.result,
            exchange_rate: stored_rate(self.exchange_rate)?,
            timestamp: self.created_at,
        })
    }
}
