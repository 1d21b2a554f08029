//! Domain models for the currency converter.

pub mod conversion;
pub mod history;

pub use conversion::{ConversionId, ConversionRecord};
pub use history::{ClientSideInfo, History, StorageMode};
