//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use exchange_rates::ExchangeRate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::StorageMode;
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount between two currencies.
///
/// Fields are optional at the wire level so that a missing or malformed
/// field is reported as invalid input rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Base currency code
    #[schema(example = "USD")]
    pub from: Option<String>,
    /// Target currency code
    #[schema(example = "EUR")]
    pub to: Option<String>,
    /// Amount in the base currency (number or numeric string)
    #[schema(value_type = f64, example = 100)]
    pub amount: Option<Value>,
}

impl ConvertRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            amount: Some(Value::from(amount)),
        }
    }

    /// Checks the request and extracts a normalized query.
    ///
    /// Currency codes are trimmed and upper-cased. The amount must be a
    /// finite, non-negative number.
    pub fn validate(&self) -> Result<ConversionQuery, DomainError> {
        let base = currency_code(self.from.as_deref(), "from")?;
        let target = currency_code(self.to.as_deref(), "to")?;

        let amount = match self.amount.as_ref() {
            None | Some(Value::Null) => return Err(DomainError::MissingField("amount")),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| DomainError::NonNumericAmount(n.to_string()))?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::NonNumericAmount(format!("{s:?}")))?,
            Some(other) => return Err(DomainError::NonNumericAmount(other.to_string())),
        };
        let amount = exchange_rates::validate_amount(amount)?;

        Ok(ConversionQuery {
            base,
            target,
            amount,
        })
    }
}

fn currency_code(raw: Option<&str>, field: &'static str) -> Result<String, DomainError> {
    let raw = raw.ok_or(DomainError::MissingField(field))?;
    let code = raw.trim();
    if code.is_empty() {
        return Err(DomainError::EmptyCurrency(field));
    }
    Ok(code.to_uppercase())
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionQuery {
    pub base: String,
    pub target: String,
    pub amount: f64,
}

/// Response after a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Converted amount, rounded to two decimals
    #[schema(example = 85.0)]
    pub result: f64,
    #[schema(value_type = f64, example = 0.85)]
    pub exchange_rate: ExchangeRate,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub timestamp: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Paths of the public endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointIndex {
    pub status: String,
    pub currencies: String,
    pub convert: String,
    pub history: String,
}

impl Default for EndpointIndex {
    fn default() -> Self {
        Self {
            status: "/api/status".into(),
            currencies: "/api/currencies".into(),
            convert: "/api/convert (POST)".into(),
            history: "/api/history".into(),
        }
    }
}

/// Static description served from the root path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "Currency Converter API")]
    pub message: String,
    #[schema(example = "Running")]
    pub status: String,
    pub endpoints: EndpointIndex,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
}

/// Runtime status and configuration presence flags.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[schema(example = "Running")]
    pub status: String,
    /// Where conversion history is kept
    #[schema(example = "localStorage (frontend)")]
    pub storage: String,
    pub storage_mode: StorageMode,
    pub has_api_key: bool,
    pub has_database_url: bool,
    #[schema(example = "development")]
    pub environment: String,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ConvertRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate_normalizes_codes() {
        let query = request(json!({"from": " usd ", "to": "eur", "amount": 100}))
            .validate()
            .unwrap();
        assert_eq!(query.base, "USD");
        assert_eq!(query.target, "EUR");
        assert_eq!(query.amount, 100.0);
    }

    #[test]
    fn test_validate_accepts_numeric_string() {
        let query = request(json!({"from": "USD", "to": "EUR", "amount": "12.5"}))
            .validate()
            .unwrap();
        assert_eq!(query.amount, 12.5);
    }

    #[test]
    fn test_validate_rejects_non_numeric_amount() {
        let err = request(json!({"from": "USD", "to": "EUR", "amount": "abc"}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::NonNumericAmount(_)));
    }

    #[test]
    fn test_validate_rejects_nan_string() {
        let err = request(json!({"from": "USD", "to": "EUR", "amount": "NaN"}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::Conversion(_)));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let err = request(json!({"from": "USD", "to": "EUR", "amount": -1}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::Conversion(_)));
    }

    #[test]
    fn test_validate_missing_fields() {
        let err = request(json!({"to": "EUR", "amount": 1})).validate().unwrap_err();
        assert!(matches!(err, DomainError::MissingField("from")));

        let err = request(json!({"from": "USD", "amount": 1})).validate().unwrap_err();
        assert!(matches!(err, DomainError::MissingField("to")));

        let err = request(json!({"from": "USD", "to": "EUR"})).validate().unwrap_err();
        assert!(matches!(err, DomainError::MissingField("amount")));
    }

    #[test]
    fn test_validate_blank_currency() {
        let err = request(json!({"from": "  ", "to": "EUR", "amount": 1}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyCurrency("from")));
    }

    #[test]
    fn test_validate_rejects_boolean_amount() {
        let err = request(json!({"from": "USD", "to": "EUR", "amount": true}))
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::NonNumericAmount(_)));
    }

    #[test]
    fn test_convert_response_field_names() {
        let response = ConvertResponse {
            result: 85.0,
            exchange_rate: ExchangeRate::new(0.85).unwrap(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"], 85.0);
        assert_eq!(json["exchangeRate"], 0.85);
        assert!(json["timestamp"].is_string());
    }
}
