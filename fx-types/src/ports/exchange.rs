//! Exchange rate provider port.
//!
//! This trait defines the interface for upstream rate services.
//! Implementations can be HTTP clients, mock providers, etc.

use exchange_rates::ExchangeRate;
use serde_json::Value;

/// Error type for exchange rate operations.
///
/// All variants mean the same thing to callers: the rate is unavailable.
/// They differ only in how much diagnostic detail the upstream gave us.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Request to rate provider failed: {0}")]
    Transport(String),

    #[error("Rate provider responded with status {status}")]
    Status { status: u16, body: Value },

    #[error("Invalid API response or currency {target} not found")]
    MissingRate { target: String, body: Value },

    #[error("Could not decode rate provider response: {0}")]
    Decode(String),
}

impl ExchangeError {
    /// Upstream HTTP status, when the provider answered with a non-2xx code.
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream error body for passthrough, or the error message.
    pub fn details(&self) -> Value {
        match self {
            ExchangeError::Status { body, .. } if !body.is_null() => body.clone(),
            _ => Value::String(self.to_string()),
        }
    }
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Get the exchange rate from `base` to `target`.
    /// Returns how many units of `target` you get for 1 unit of `base`.
    async fn fetch_rate(&self, base: &str, target: &str) -> Result<ExchangeRate, ExchangeError>;

    /// Get the provider's list of supported currencies, as returned.
    async fn list_currencies(&self) -> Result<Value, ExchangeError>;
}
