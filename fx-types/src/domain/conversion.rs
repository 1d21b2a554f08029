//! Conversion record domain model.

use chrono::{DateTime, Utc};
use exchange_rates::ExchangeRate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a ConversionRecord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ConversionId(Uuid);

impl ConversionId {
    /// Creates a new random ConversionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ConversionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for ConversionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ConversionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One completed conversion.
///
/// Created once, when a conversion succeeds, and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: ConversionId,
    /// Base currency code
    #[schema(example = "USD")]
    pub from_currency: String,
    /// Target currency code
    #[schema(example = "EUR")]
    pub to_currency: String,
    /// Amount in the base currency
    #[schema(example = 100.0)]
    pub amount: f64,
    /// Converted amount, rounded to two decimals
    #[schema(example = 85.0)]
    pub result: f64,
    #[schema(value_type = f64, example = 0.85)]
    pub exchange_rate: ExchangeRate,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    /// Creates a record for a conversion that just completed.
    pub fn new(
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
        amount: f64,
        result: f64,
        exchange_rate: ExchangeRate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ConversionId::new(),
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            amount,
            result,
            exchange_rate,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let rate = ExchangeRate::new(0.85).unwrap();
        let ts = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = ConversionRecord::new("USD", "EUR", 100.0, 85.0, rate, ts);

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["fromCurrency"], "USD");
        assert_eq!(json["toCurrency"], "EUR");
        assert_eq!(json["result"], 85.0);
        assert_eq!(json["exchangeRate"], 0.85);
        assert_eq!(json["timestamp"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_conversion_id_parse() {
        let id = ConversionId::new();
        let parsed: ConversionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
