//! Engine configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that turns on stderr debug logging in the binary
pub const DEBUG_ENV: &str = "GAUNTLET_DEBUG";

/// Timing and persistence settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Presentation timings
    pub timing: TimingConfig,
    /// Save slot layout
    pub saves: SaveConfig,
    /// Consecutive branch hops allowed before the story is treated as cyclic
    pub branch_hop_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            saves: SaveConfig::default(),
            branch_hop_limit: 64,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(Self::from_json_str(&json)?)
    }

    /// Same settings with every delay removed
    pub fn instant(mut self) -> Self {
        self.timing = TimingConfig::instant();
        self
    }
}

/// Presentation timings, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Per character while text is revealed
    pub typewriter_speed: u64,
    /// Per character while the player holds for fast reveal
    pub typewriter_speed_fast: u64,
    /// Per logo line
    pub logo_line_delay: u64,
    /// Between a choice response and the next node
    pub line_delay: u64,
    /// Before choices appear
    pub choice_delay: u64,
    /// Settle time of the ending cue
    pub ending_cue: u64,
    /// After ending text, before "Play Again"
    pub ending_delay: u64,
    /// Pause after the intro logo and after the tagline
    pub intro_pause: u64,
    /// Pause between intro title and tagline
    pub intro_line_pause: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            typewriter_speed: 25,
            typewriter_speed_fast: 5,
            logo_line_delay: 50,
            line_delay: 100,
            choice_delay: 300,
            ending_cue: 300,
            ending_delay: 1000,
            intro_pause: 500,
            intro_line_pause: 300,
        }
    }
}

impl TimingConfig {
    pub fn instant() -> Self {
        Self {
            typewriter_speed: 0,
            typewriter_speed_fast: 0,
            logo_line_delay: 0,
            line_delay: 0,
            choice_delay: 0,
            ending_cue: 0,
            ending_delay: 0,
            intro_pause: 0,
            intro_line_pause: 0,
        }
    }
}

/// Storage key layout for saves
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SaveConfig {
    /// Number of manual slots, numbered from 1
    pub slot_count: u8,
    /// Slot `n` is stored under `{slot_key_prefix}{n}`
    pub slot_key_prefix: String,
    pub autosave_key: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            slot_count: 3,
            slot_key_prefix: "c2s_save_".to_string(),
            autosave_key: "c2s_autosave".to_string(),
        }
    }
}

impl SaveConfig {
    /// Storage key of a manual slot, if the slot exists
    pub fn slot_key(&self, slot: u8) -> Option<String> {
        (1..=self.slot_count)
            .contains(&slot)
            .then(|| format!("{}{}", self.slot_key_prefix, slot))
    }
}
