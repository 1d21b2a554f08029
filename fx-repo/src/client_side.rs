//! History adapter for deployments where the browser keeps history.

use async_trait::async_trait;

use fx_types::{ClientSideInfo, ConversionRecord, History, HistoryStore, RepoError, StorageMode};

/// Keeps nothing on the server.
///
/// Recording always succeeds and reading returns a fixed message pointing
/// the caller at browser local storage.
#[derive(Debug, Clone, Default)]
pub struct ClientSideHistory {
    info: ClientSideInfo,
}

impl ClientSideHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for ClientSideHistory {
    fn mode(&self) -> StorageMode {
        StorageMode::ClientSide
    }

    async fn record(&self, entry: &ConversionRecord) -> Result<(), RepoError> {
        tracing::debug!(conversion_id = %entry.id, "history kept client-side, not recorded");
        Ok(())
    }

    async fn recent_history(&self, _limit: u32) -> Result<History, RepoError> {
        Ok(History::ClientSide(self.info.clone()))
    }
}
