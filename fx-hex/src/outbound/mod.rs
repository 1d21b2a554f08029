//! Outbound adapters.

mod currency_api;

pub use currency_api::{DEFAULT_BASE_URL, FreeCurrencyApi};
