//! Save/load/autosave orchestration
//!
//! Every operation here is total: storage and serialization failures are
//! logged and reported as "did not happen".

use super::{SaveRecord, SaveStore, StorageError, decode, encode};
use crate::config::SaveConfig;
use crate::types::state::GameState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a slot holds, for save/load menus
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotSummary {
    pub slot: u8,
    /// `None` for an empty slot
    pub info: Option<SlotInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotInfo {
    pub player_name: String,
    pub day: u32,
    pub episode: u32,
    pub timestamp: u64,
}

impl From<&SaveRecord> for SlotInfo {
    fn from(record: &SaveRecord) -> Self {
        Self {
            player_name: record.state.player_name.clone(),
            day: record.state.day,
            episode: record.state.episode,
            timestamp: record.timestamp,
        }
    }
}

/// Save slots and the autosave over a [`SaveStore`]
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn SaveStore>,
    config: SaveConfig,
}

impl Persistence {
    pub fn new(store: Arc<dyn SaveStore>, config: SaveConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Overwrite the autosave with the current state
    pub async fn auto_save(&self, state: &GameState) -> bool {
        self.report("autosave", self.write(&self.config.autosave_key, state).await)
    }

    pub async fn load_auto_save(&self) -> Option<SaveRecord> {
        self.report_read("load autosave", self.read(&self.config.autosave_key).await)
    }

    pub async fn clear_auto_save(&self) -> bool {
        self.report(
            "clear autosave",
            self.store.delete(&self.config.autosave_key).await,
        )
    }

    pub async fn save_to_slot(&self, slot: u8, state: &GameState) -> bool {
        let Some(key) = self.config.slot_key(slot) else {
            log::warn!("save to nonexistent slot {}", slot);
            return false;
        };
        let saved = self.report("save", self.write(&key, state).await);
        if saved {
            log::info!("saved to slot {}", slot);
        }
        saved
    }

    pub async fn load_from_slot(&self, slot: u8) -> Option<SaveRecord> {
        let Some(key) = self.config.slot_key(slot) else {
            log::warn!("load from nonexistent slot {}", slot);
            return None;
        };
        self.report_read("load", self.read(&key).await)
    }

    /// Summaries of slots `1..=slot_count`
    pub async fn list_slots(&self) -> Vec<SlotSummary> {
        let mut slots = Vec::with_capacity(usize::from(self.config.slot_count));
        for slot in 1..=self.config.slot_count {
            let info = self
                .load_from_slot(slot)
                .await
                .map(|record| SlotInfo::from(&record));
            slots.push(SlotSummary { slot, info });
        }
        slots
    }

    async fn write(&self, key: &str, state: &GameState) -> Result<(), StorageError> {
        let json = encode(&SaveRecord::capture(state))?;
        self.store.set(key, json).await
    }

    async fn read(&self, key: &str) -> Result<Option<SaveRecord>, StorageError> {
        match self.store.get(key).await? {
            Some(json) => decode(&json).map(Some),
            None => Ok(None),
        }
    }

    fn report(&self, operation: &str, result: Result<(), StorageError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to {}: {}", operation, e);
                false
            }
        }
    }

    fn report_read(
        &self,
        operation: &str,
        result: Result<Option<SaveRecord>, StorageError>,
    ) -> Option<SaveRecord> {
        result.unwrap_or_else(|e| {
            log::error!("Failed to {}: {}", operation, e);
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl SaveStore for FailingStore {
        async fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable {
                reason: "quota exceeded".to_string(),
            })
        }

        async fn set(&self, _: &str, _: String) -> Result<(), StorageError> {
            Err(StorageError::Unavailable {
                reason: "quota exceeded".to_string(),
            })
        }

        async fn delete(&self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable {
                reason: "quota exceeded".to_string(),
            })
        }
    }

    fn state() -> GameState {
        GameState {
            player_name: "ALEX".to_string(),
            current_node: "day1_camp".to_string(),
            day: 1,
            episode: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn slot_round_trip_keeps_every_field() {
        let persistence = Persistence::new(Arc::new(MemoryStore::new()), SaveConfig::default());
        let state = state();

        assert!(persistence.save_to_slot(2, &state).await);
        let record = persistence.load_from_slot(2).await.unwrap();

        assert_eq!(record.state, state);
        assert!(record.timestamp > 0);
        assert_eq!(persistence.load_from_slot(1).await, None);
    }

    #[tokio::test]
    async fn out_of_range_slots_do_nothing() {
        let store = Arc::new(MemoryStore::new());
        let persistence = Persistence::new(store.clone(), SaveConfig::default());

        assert!(!persistence.save_to_slot(0, &state()).await);
        assert!(!persistence.save_to_slot(4, &state()).await);
        assert!(store.keys().is_empty());
        assert_eq!(persistence.load_from_slot(9).await, None);
    }

    #[tokio::test]
    async fn autosave_is_separate_from_slots() {
        let store = Arc::new(MemoryStore::new());
        let persistence = Persistence::new(store.clone(), SaveConfig::default());

        assert!(persistence.auto_save(&state()).await);
        assert_eq!(store.keys(), vec!["c2s_autosave".to_string()]);
        assert!(persistence.load_auto_save().await.is_some());

        assert!(persistence.clear_auto_save().await);
        assert_eq!(persistence.load_auto_save().await, None);
    }

    #[tokio::test]
    async fn list_slots_reports_contents() {
        let persistence = Persistence::new(Arc::new(MemoryStore::new()), SaveConfig::default());
        persistence.save_to_slot(3, &state()).await;

        let slots = persistence.list_slots().await;

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].info, None);
        let info = slots[2].info.as_ref().unwrap();
        assert_eq!(info.player_name, "ALEX");
        assert_eq!((info.day, info.episode), (1, 2));
    }

    #[tokio::test]
    async fn corrupt_record_loads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set("c2s_save_1", "{not json".to_string()).await.unwrap();
        let persistence = Persistence::new(store, SaveConfig::default());

        assert_eq!(persistence.load_from_slot(1).await, None);
    }

    #[tokio::test]
    async fn storage_failures_are_contained() {
        let persistence = Persistence::new(Arc::new(FailingStore), SaveConfig::default());

        assert!(!persistence.auto_save(&state()).await);
        assert!(!persistence.save_to_slot(1, &state()).await);
        assert!(!persistence.clear_auto_save().await);
        assert_eq!(persistence.load_auto_save().await, None);
        assert_eq!(persistence.load_from_slot(1).await, None);
        assert!(persistence.list_slots().await.iter().all(|s| s.info.is_none()));
    }
}
