//! Status panel data built from the game state

use crate::types::{content::CharacterRegistry, state::GameState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a character feels about the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipTier {
    Ally,
    Friend,
    Neutral,
    Rival,
    Enemy,
}

impl RelationshipTier {
    pub fn from_value(value: i32) -> Self {
        match value {
            50.. => Self::Ally,
            25..=49 => Self::Friend,
            -24..=24 => Self::Neutral,
            -49..=-25 => Self::Rival,
            _ => Self::Enemy,
        }
    }
}

impl fmt::Display for RelationshipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ally => "Ally",
            Self::Friend => "Friend",
            Self::Neutral => "Neutral",
            Self::Rival => "Rival",
            Self::Enemy => "Enemy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipLine {
    pub character: String,
    pub name: String,
    pub value: i32,
    pub tier: RelationshipTier,
}

/// Snapshot of everything the status panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub player_name: String,
    pub challenge_wins: u32,
    pub elimination_wins: u32,
    /// Players still in the game
    pub relationships: Vec<RelationshipLine>,
    pub alliances: Vec<String>,
    pub eliminated: Vec<String>,
}

impl StatusReport {
    pub fn new(state: &GameState, characters: &CharacterRegistry) -> Self {
        let display_name = |id: &str| {
            characters
                .get(id)
                .map(|npc| npc.name.clone())
                .unwrap_or_else(|| capitalize(id))
        };

        let relationships = state
            .relationships
            .iter()
            .filter(|(id, _)| !state.is_eliminated(id))
            .map(|(id, value)| RelationshipLine {
                character: id.clone(),
                name: display_name(id.as_str()),
                value: *value,
                tier: RelationshipTier::from_value(*value),
            })
            .collect();

        Self {
            player_name: state.player_name.clone(),
            challenge_wins: state.challenge_wins,
            elimination_wins: state.elimination_wins,
            relationships,
            alliances: state.alliances.iter().map(|a| alliance_name(a)).collect(),
            eliminated: state.eliminated_players.iter().map(|p| display_name(p.as_str())).collect(),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PLAYER")?;
        writeln!(f, "  {}", self.player_name)?;
        writeln!(f, "  Challenge Wins: {}", self.challenge_wins)?;
        writeln!(f, "  Elimination Wins: {}", self.elimination_wins)?;

        writeln!(f, "RELATIONSHIPS")?;
        for line in &self.relationships {
            writeln!(f, "  {:<12} {:>+4}  {}", line.name, line.value, line.tier)?;
        }

        if !self.alliances.is_empty() {
            writeln!(f, "ALLIANCES")?;
            for alliance in &self.alliances {
                writeln!(f, "  - {}", alliance)?;
            }
        }

        if !self.eliminated.is_empty() {
            writeln!(f, "ELIMINATED")?;
            for player in &self.eliminated {
                writeln!(f, "  - {}", player)?;
            }
        }
        Ok(())
    }
}

/// `final_two` becomes `Final Two`
pub fn alliance_name(alliance: &str) -> String {
    alliance
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
