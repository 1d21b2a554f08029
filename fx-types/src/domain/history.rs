//! Conversion history views.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::conversion::ConversionRecord;

/// Where conversion history lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// The caller keeps history in browser local storage.
    ClientSide,
    Sqlite,
    Postgres,
}

impl StorageMode {
    /// Returns true when the server keeps conversion records itself.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, StorageMode::ClientSide)
    }

    /// Human readable description used by the status endpoint.
    pub fn describe(&self) -> &'static str {
        match self {
            StorageMode::ClientSide => "localStorage (frontend)",
            StorageMode::Sqlite => "sqlite",
            StorageMode::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Fixed payload returned when history is kept by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClientSideInfo {
    pub message: String,
    pub storage: String,
    pub instructions: String,
}

impl Default for ClientSideInfo {
    fn default() -> Self {
        Self {
            message: "Conversion history is stored in browser localStorage".into(),
            storage: "frontend".into(),
            instructions: r#"Use localStorage.getItem("conversionHistory") to access history"#
                .into(),
        }
    }
}

/// Result of a history lookup.
///
/// Serializes as a bare JSON array of records, or as the client-side
/// information object when the server keeps no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum History {
    Records(Vec<ConversionRecord>),
    ClientSide(ClientSideInfo),
}

impl History {
    /// Returns the records, or an empty slice for client-side history.
    pub fn records(&self) -> &[ConversionRecord] {
        match self {
            History::Records(records) => records,
            History::ClientSide(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_side_history_shape() {
        let json = serde_json::to_value(History::ClientSide(ClientSideInfo::default())).unwrap();
        assert_eq!(json["storage"], "frontend");
        assert!(json["message"].as_str().unwrap().contains("localStorage"));
    }

    #[test]
    fn test_empty_records_serialize_as_array() {
        let json = serde_json::to_string(&History::Records(vec![])).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_history_deserializes_both_shapes() {
        let records: History = serde_json::from_str("[]").unwrap();
        assert_eq!(records, History::Records(vec![]));

        let info = serde_json::to_string(&ClientSideInfo::default()).unwrap();
        let parsed: History = serde_json::from_str(&info).unwrap();
        assert!(matches!(parsed, History::ClientSide(_)));
    }

    #[test]
    fn test_storage_mode_persistence() {
        assert!(!StorageMode::ClientSide.is_persistent());
        assert!(StorageMode::Sqlite.is_persistent());
        assert_eq!(StorageMode::Postgres.to_string(), "postgres");
    }
}
