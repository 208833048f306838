//! Player input sent back to the interpreter

use serde::{Deserialize, Serialize};

/// External events that resume a suspended interpreter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    /// Continue past narrative text (tap, Enter, space)
    Advance,
    /// Pick a presented choice, 1-indexed to match what was displayed
    Choose { index: usize },
    /// Name typed at the end of the intro
    PlayerName { name: String },
}

impl Event {
    pub fn choose(index: usize) -> Self {
        Self::Choose { index }
    }

    pub fn player_name(name: impl Into<String>) -> Self {
        Self::PlayerName { name: name.into() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Advance => "advance",
            Event::Choose { .. } => "choose",
            Event::PlayerName { .. } => "player_name",
        }
    }
}
