//! History store port.
//!
//! Conversion history is an optional capability: one adapter persists
//! records, another leaves history to the caller and answers with a fixed
//! message. The service is handed one of them at startup.

use crate::domain::{ConversionRecord, History, StorageMode};
use crate::error::RepoError;

/// Port for recording and reading conversion history.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Which storage backs this store.
    fn mode(&self) -> StorageMode;

    /// Appends a record. Records are never updated or removed.
    async fn record(&self, entry: &ConversionRecord) -> Result<(), RepoError>;

    /// Returns at most `limit` records, newest first.
    ///
    /// Records with equal timestamps come back in reverse insertion order.
    async fn recent_history(&self, limit: u32) -> Result<History, RepoError>;
}
