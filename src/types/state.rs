//! The single mutable game-state record

use crate::types::content::{CharacterRegistry, GameStateTemplate, VoteRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Lowest relationship value a character can hold
pub const RELATIONSHIP_MIN: i32 = -100;
/// Highest relationship value a character can hold
pub const RELATIONSHIP_MAX: i32 = 100;

/// Everything that changes while a story is played
///
/// Maps are ordered so that equal states always serialize identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    /// Empty until the intro completes
    #[serde(default)]
    pub player_name: String,
    pub current_node: String,
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub episode: u32,
    #[serde(default)]
    pub relationships: BTreeMap<String, i32>,
    #[serde(default)]
    pub flags: BTreeMap<String, Value>,
    #[serde(default)]
    pub alliances: Vec<String>,
    #[serde(default)]
    pub challenge_wins: u32,
    #[serde(default)]
    pub elimination_wins: u32,
    #[serde(default)]
    pub vote_history: Vec<VoteRecord>,
    #[serde(default)]
    pub eliminated_players: Vec<String>,
    #[serde(default)]
    pub active_players: Vec<String>,
}

impl GameState {
    /// Build a fresh state from the content's template
    ///
    /// Relationship keys come from the template; each one that names a known
    /// character starts at that character's disposition.
    pub fn from_template(template: &GameStateTemplate, characters: &CharacterRegistry) -> Self {
        let relationships = template
            .relationships
            .iter()
            .map(|(id, value)| {
                let start = characters
                    .get(id)
                    .map(|npc| npc.starting_disposition)
                    .unwrap_or(*value);
                (id.clone(), clamp_relationship(i64::from(start)))
            })
            .collect();

        Self {
            player_name: template.player_name.clone(),
            current_node: template.current_node.clone(),
            day: template.day,
            episode: template.episode,
            relationships,
            flags: template.flags.clone(),
            alliances: dedup(&template.alliances),
            challenge_wins: template.challenge_wins,
            elimination_wins: template.elimination_wins,
            vote_history: template.vote_history.clone(),
            eliminated_players: template.eliminated_players.clone(),
            active_players: template.active_players.clone(),
        }
    }

    /// Player name if the intro has completed
    pub fn player(&self) -> Option<&str> {
        if self.player_name.is_empty() {
            None
        } else {
            Some(&self.player_name)
        }
    }

    /// Current relationship value, 0 for characters without an entry
    pub fn relationship(&self, character: &str) -> i32 {
        self.relationships.get(character).copied().unwrap_or(0)
    }

    /// Add a delta to a tracked relationship, keeping it within bounds
    ///
    /// Returns `false` and leaves the state alone when the character is not
    /// tracked.
    pub fn adjust_relationship(&mut self, character: &str, delta: i32) -> bool {
        match self.relationships.get_mut(character) {
            Some(value) => {
                *value = clamp_relationship(i64::from(*value) + i64::from(delta));
                true
            }
            None => false,
        }
    }

    pub fn flag(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: Value) {
        self.flags.insert(name.into(), value);
    }

    pub fn has_alliance(&self, alliance: &str) -> bool {
        self.alliances.iter().any(|a| a == alliance)
    }

    /// Insert an alliance; a second insert of the same name is a no-op
    pub fn add_alliance(&mut self, alliance: &str) -> bool {
        if self.has_alliance(alliance) {
            return false;
        }
        self.alliances.push(alliance.to_string());
        true
    }

    pub fn is_eliminated(&self, character: &str) -> bool {
        self.eliminated_players.iter().any(|p| p == character)
    }
}

/// Clamp a relationship value into `[RELATIONSHIP_MIN, RELATIONSHIP_MAX]`
pub fn clamp_relationship(value: i64) -> i32 {
    value.clamp(i64::from(RELATIONSHIP_MIN), i64::from(RELATIONSHIP_MAX)) as i32
}

fn dedup(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::content::Character;

    fn template() -> GameStateTemplate {
        GameStateTemplate {
            current_node: "intro".to_string(),
            day: 1,
            episode: 1,
            relationships: BTreeMap::from([
                ("jordan".to_string(), 0),
                ("riley".to_string(), 0),
                ("sam".to_string(), 5),
            ]),
            active_players: vec!["jordan".into(), "riley".into(), "sam".into()],
            ..Default::default()
        }
    }

    #[test]
    fn new_state_seeds_dispositions_from_characters() {
        let characters = CharacterRegistry::new(vec![
            Character::new("jordan", "Jordan", 20),
            Character::new("riley", "Riley", -10),
            Character::new("casey", "Casey", 40),
        ]);

        let state = GameState::from_template(&template(), &characters);

        assert_eq!(state.relationship("jordan"), 20);
        assert_eq!(state.relationship("riley"), -10);
        // Template value survives for characters without a registry entry
        assert_eq!(state.relationship("sam"), 5);
        // Not in the template, so not tracked
        assert!(!state.relationships.contains_key("casey"));
        assert_eq!(state.current_node, "intro");
        assert_eq!(state.player(), None);
    }

    #[test]
    fn new_state_does_not_alias_template() {
        let template = template();
        let mut state = GameState::from_template(&template, &CharacterRegistry::default());

        state.adjust_relationship("jordan", 10);
        state.active_players.clear();

        assert_eq!(template.relationships["jordan"], 0);
        assert_eq!(template.active_players.len(), 3);
    }

    #[test]
    fn relationship_is_clamped_both_ways() {
        let mut state = GameState::from_template(&template(), &CharacterRegistry::default());
        state.relationships.insert("jordan".into(), 90);
        state.relationships.insert("riley".into(), -90);

        state.adjust_relationship("jordan", 50);
        state.adjust_relationship("riley", -50);

        assert_eq!(state.relationship("jordan"), 100);
        assert_eq!(state.relationship("riley"), -100);

        state.adjust_relationship("jordan", i32::MAX);
        state.adjust_relationship("riley", i32::MIN);
        assert_eq!(state.relationship("jordan"), 100);
        assert_eq!(state.relationship("riley"), -100);
    }

    #[test]
    fn unknown_character_is_ignored() {
        let mut state = GameState::from_template(&template(), &CharacterRegistry::default());
        let before = state.clone();

        assert!(!state.adjust_relationship("nobody", 10));
        assert_eq!(state, before);
        assert_eq!(state.relationship("nobody"), 0);
    }

    #[test]
    fn alliance_insert_is_idempotent() {
        let mut state = GameState::default();

        assert!(state.add_alliance("final_two"));
        assert!(!state.add_alliance("final_two"));
        assert_eq!(state.alliances, vec!["final_two".to_string()]);
    }
}
