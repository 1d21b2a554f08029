//! Converter Application Service
//!
//! Orchestrates rate lookup, conversion, and history through the ports.
//! Contains NO infrastructure logic - pure orchestration.

use chrono::{SubsecRound, Utc};
use serde_json::Value;

use fx_types::{
    AppError, ConversionRecord, ConvertRequest, ConvertResponse, ExchangeRateProvider, History,
    HistoryStore, StorageMode,
};

/// Number of records returned by the history operation.
pub const HISTORY_LIMIT: u32 = 10;

/// Application service for currency conversion.
///
/// Generic over the rate provider and the history store; both are injected
/// at startup. Whether history is persisted is decided entirely by which
/// `HistoryStore` is passed in.
pub struct ConverterService<P: ExchangeRateProvider, H: HistoryStore> {
    rates: P,
    history: H,
}

impl<P: ExchangeRateProvider, H: HistoryStore> ConverterService<P, H> {
    /// Creates a new converter service.
    pub fn new(rates: P, history: H) -> Self {
        Self { rates, history }
    }

    pub fn rates(&self) -> &P {
        &self.rates
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.history.mode()
    }

    /// Returns the provider's currency list unchanged.
    pub async fn list_currencies(&self) -> Result<Value, AppError> {
        self.rates.list_currencies().await.map_err(Into::into)
    }

    /// Converts an amount and records the conversion.
    ///
    /// Input is validated before the provider is called.
    pub async fn convert(&self, req: &ConvertRequest) -> Result<ConvertResponse, AppError> {
        let query = req.validate()?;
        tracing::info!(
            base = %query.base,
            target = %query.target,
            amount = query.amount,
            "converting"
        );

        let rate = self.rates.fetch_rate(&query.base, &query.target).await?;
        let result = exchange_rates::convert(query.amount, rate)?;
        // Microsecond precision, the finest the history stores keep
        let timestamp = Utc::now().trunc_subsecs(6);

        tracing::info!(rate = rate.value(), result, "conversion computed");

        let record = ConversionRecord::new(
            query.base,
            query.target,
            query.amount,
            result,
            rate,
            timestamp,
        );
        self.history.record(&record).await?;

        Ok(ConvertResponse {
            result,
            exchange_rate: rate,
            timestamp,
        })
    }

    /// Returns the most recent conversions, or the client-side notice.
    pub async fn recent_history(&self) -> Result<History, AppError> {
        self.history
            .recent_history(HISTORY_LIMIT)
            .await
            .map_err(Into::into)
    }
}
