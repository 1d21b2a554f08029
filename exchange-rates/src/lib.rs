//! Exchange Rate Arithmetic
//!
//! Leaf library holding the validated [`ExchangeRate`] value and the
//! conversion calculator used by the currency converter service.
//!
//! Results are rounded to two decimal places, half away from zero, on the
//! exact binary value of `amount * rate`. No per-currency precision table is
//! consulted: a JPY or BHD result is rounded to cents like any other.
//!
//! # Example
//! ```
//! use exchange_rates::{ExchangeRate, convert};
//!
//! let rate = ExchangeRate::new(0.85).unwrap();
//! assert_eq!(convert(100.0, rate).unwrap(), 85.0);
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures of the conversion calculator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Amount must be a finite, non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("Exchange rate must be a finite, positive number, got {0}")]
    InvalidRate(f64),

    #[error("Converting {amount} at rate {rate} produced a non-finite result")]
    NonFiniteResult { amount: f64, rate: f64 },
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange Rate
// ─────────────────────────────────────────────────────────────────────────────

/// Units of the target currency per one unit of the base currency.
///
/// Always finite and strictly positive. Only meaningful at the instant it
/// was fetched; nothing here tracks its age.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(value: f64) -> Result<Self, ConversionError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConversionError::InvalidRate(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ExchangeRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// At or above this magnitude an `f64` carries no cent fraction, so the value
/// is already rounded.
const EXACT_CENTS_LIMIT: f64 = 90_071_992_547_409.0;

/// Checks that an amount can be converted: finite and not negative.
pub fn validate_amount(amount: f64) -> Result<f64, ConversionError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(ConversionError::InvalidAmount(amount))
    }
}

/// Converts `amount` at `rate`, rounded to two decimal places.
pub fn convert(amount: f64, rate: ExchangeRate) -> Result<f64, ConversionError> {
    let amount = validate_amount(amount)?;
    let product = amount * rate.value();
    if !product.is_finite() {
        return Err(ConversionError::NonFiniteResult {
            amount,
            rate: rate.value(),
        });
    }
    Ok(round_to_cents(product))
}

/// Rounds a finite value to two decimal places, half away from zero.
///
/// The decision is taken on the exact binary value, so `2.675` (stored as
/// `2.67499999…`) rounds down to `2.67` while `0.125` rounds up to `0.13`.
pub fn round_to_cents(value: f64) -> f64 {
    if value.abs() >= EXACT_CENTS_LIMIT {
        return value;
    }

    let cents = Decimal::from_f64_retain(value)
        .and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED))
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_i64());

    match cents {
        Some(cents) => cents as f64 / 100.0,
        None => (value * 100.0).round() / 100.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
