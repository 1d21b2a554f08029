//! # FX Hex
//!
//! Application service layer and adapters for the currency converter.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates rate lookup, conversion, history)
//! - `outbound/` - HTTP client for the upstream rate provider
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: ExchangeRateProvider` and `H: HistoryStore`,
//! allowing different providers and history stores to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;


pub use service::{ConverterService, HISTORY_LIMIT};
