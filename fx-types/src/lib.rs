//! # FX Types
//!
//! Domain types and port traits for the currency converter service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Conversion records and history views
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto` - Data Transfer Objects for API boundaries
//! - `error` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ClientSideInfo, ConversionId, ConversionRecord, History, StorageMode};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use exchange_rates::{ConversionError, ExchangeRate};
pub use ports::{ExchangeError, ExchangeRateProvider, HistoryStore};
