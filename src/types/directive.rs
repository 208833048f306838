//! Directive type representing what the renderer should do next
//!
//! Directives are data: the interpreter emits them in order and the renderer
//! carries them out. Nothing in here touches game state.

use serde::{Deserialize, Serialize};

/// A single renderer instruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Directive {
    /// Wipe the text area
    ClearOutput,
    /// Refresh the day/episode/player-count header
    UpdateHeader(Header),
    /// Reveal text; the renderer may collapse the reveal on skip
    DisplayText { text: String, style: TextStyle },
    /// Show the numbered choice list
    PresentChoices { choices: Vec<ChoiceItem> },
    ClearChoices,
    /// Toggle the "press to continue" affordance
    ContinueAvailable(bool),
    Divider,
    /// Transient pulse shown when an ending is reached
    EndingCue,
    /// Cooperative pause before the next directive
    Delay { ms: u64 },
    /// Visible error state; story progression has stopped
    Error { message: String },
}

impl Directive {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::DisplayText {
            text: text.into(),
            style,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// How displayed text should be styled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextStyle {
    Body,
    Logo,
    Highlight,
    Response,
    Ending,
}

/// Header contents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub day: u32,
    pub episode: u32,
    pub active_players: usize,
}

impl Header {
    pub fn day_label(&self) -> String {
        format!("DAY {}", self.day)
    }

    pub fn episode_label(&self) -> String {
        format!("EPISODE {}", self.episode)
    }

    pub fn players_label(&self) -> String {
        let plural = if self.active_players == 1 { "" } else { "S" };
        format!("{} PLAYER{}", self.active_players, plural)
    }
}

/// A presented choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceItem {
    /// 1-indexed position, as shown to the player
    pub index: usize,
    pub label: String,
}

impl ChoiceItem {
    /// Number the labels from 1
    pub fn numbered<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Self {
                index: i + 1,
                label: label.into(),
            })
            .collect()
    }
}
