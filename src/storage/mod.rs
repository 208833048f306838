//! Storage module for saving and loading game state
//!
//! Stores are plain key-value backends holding JSON text, the way browser
//! local storage does. [`Persistence`] sits on top, turning game state into
//! timestamped [`SaveRecord`]s and swallowing every storage failure so that
//! callers only ever see "saved" or "not saved".

use crate::types::state::GameState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod file;
pub mod memory;
pub mod persistence;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use persistence::{Persistence, SlotInfo, SlotSummary};

/// A saved game: the full state plus when it was captured
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveRecord {
    #[serde(flatten)]
    pub state: GameState,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl SaveRecord {
    /// Stamp a copy of `state` with the current time
    pub fn capture(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            timestamp: now_millis(),
        }
    }
}

/// Key-value backend for save records
#[async_trait]
pub trait SaveStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Invalid storage key: '{key}'")]
    InvalidKey { key: String },
}

/// Save record to JSON text
pub fn encode(record: &SaveRecord) -> Result<String, StorageError> {
    Ok(serde_json::to_string(record)?)
}

/// Save record from JSON text
pub fn decode(json: &str) -> Result<SaveRecord, StorageError> {
    Ok(serde_json::from_str(json)?)
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_then_decode_restores_state() {
        let mut state = GameState::default();
        state.player_name = "ALEX".to_string();
        state.current_node = "day2_morning".to_string();
        state.relationships.insert("jordan".into(), 42);
        state.set_flag("won_challenge", json!(true));
        state.add_alliance("final_two");

        let record = SaveRecord::capture(&state);
        let restored = decode(&encode(&record).unwrap()).unwrap();

        assert_eq!(restored.state, state);
        assert_eq!(restored.timestamp, record.timestamp);
    }

    #[test]
    fn record_is_flat_with_timestamp() {
        let record = SaveRecord {
            state: GameState {
                current_node: "intro".to_string(),
                ..Default::default()
            },
            timestamp: 1_700_000_000_000,
        };

        let value: serde_json::Value = serde_json::from_str(&encode(&record).unwrap()).unwrap();

        assert_eq!(value["current_node"], "intro");
        assert_eq!(value["timestamp"], 1_700_000_000_000u64);
    }

    #[test]
    fn decode_invalid_data_returns_error() {
        let result = decode("invalid json data");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
