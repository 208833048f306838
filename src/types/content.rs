//! Immutable story content: nodes, characters, and the zero-state template
//!
//! A [`ContentGraph`] is produced once by the loader and shared read-only with
//! the interpreter. Node and condition kinds are closed enums tagged by a
//! `"type"` field, so an unknown kind fails at parse time instead of at
//! dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Fully loaded story content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentGraph {
    /// Titles and intro art
    #[serde(default)]
    pub meta: ContentMeta,
    /// All nodes keyed by id
    pub nodes: HashMap<String, Node>,
    /// Cast of non-player characters
    #[serde(default)]
    pub characters: CharacterRegistry,
    /// Shape of a fresh game
    pub game_state_template: GameStateTemplate,
}

impl ContentGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Id of the node a new game starts at
    pub fn start_node(&self) -> &str {
        &self.game_state_template.current_node
    }
}

/// Presentation text shown around the story itself
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentMeta {
    pub title: String,
    pub tagline: String,
    pub logo: Option<String>,
    /// Player count the header shows while no roster is tracked
    pub cast_size: usize,
}

impl Default for ContentMeta {
    fn default() -> Self {
        Self {
            title: "Challenge 2 Survive".to_string(),
            tagline: "A text-based reality competition.".to_string(),
            logo: None,
            cast_size: 8,
        }
    }
}

/// A single addressable unit of story content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    /// Character id of whoever speaks the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn narrative(text: impl Into<String>, next: Option<&str>) -> Self {
        Self::with_kind(
            text,
            NodeKind::Narrative {
                next: next.map(str::to_string),
            },
        )
    }

    pub fn choice(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self::with_kind(text, NodeKind::Choice { choices })
    }

    pub fn branch(condition: Condition) -> Self {
        Self::with_kind(String::new(), NodeKind::Branch { condition })
    }

    pub fn ending(text: impl Into<String>) -> Self {
        Self::with_kind(text, NodeKind::Ending)
    }

    fn with_kind(text: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            day: None,
            episode: None,
            speaker: None,
            text: text.into(),
            kind,
        }
    }

    pub fn spoken_by(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn on_day(mut self, day: u32, episode: u32) -> Self {
        self.day = Some(day);
        self.episode = Some(episode);
        self
    }

    /// Narrative and choice nodes are the player-visible stops that autosave
    pub fn is_checkpoint(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Narrative { .. } | NodeKind::Choice { .. }
        )
    }

    /// Every node id this node can transition to
    pub fn targets(&self) -> Vec<&str> {
        match &self.kind {
            NodeKind::Narrative { next } => next.iter().map(String::as_str).collect(),
            NodeKind::Choice { choices } => choices.iter().filter_map(|c| c.next.as_deref()).collect(),
            NodeKind::Branch { condition } => {
                let (t, f) = condition.targets();
                vec![t, f]
            }
            NodeKind::Ending => Vec::new(),
        }
    }
}

/// Kind-specific part of a node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Narrative {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<String>,
    },
    Choice {
        choices: Vec<Choice>,
    },
    Branch {
        condition: Condition,
    },
    Ending,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Narrative { .. } => "narrative",
            NodeKind::Choice { .. } => "choice",
            NodeKind::Branch { .. } => "branch",
            NodeKind::Ending => "ending",
        }
    }
}

/// One option on a choice node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Effects>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl Choice {
    pub fn new(text: impl Into<String>, next: Option<&str>) -> Self {
        Self {
            text: text.into(),
            response_text: None,
            effects: None,
            next: next.map(str::to_string),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response_text = Some(response.into());
        self
    }

    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = Some(effects);
        self
    }
}

/// Routing rule of a branch node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    FlagCheck {
        flag: String,
        if_true: String,
        if_false: String,
    },
    RelationshipCheck {
        character: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        above: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        below: Option<i32>,
        if_true: String,
        if_false: String,
    },
    AllianceCheck {
        alliance: String,
        if_true: String,
        if_false: String,
    },
}

impl Condition {
    /// `(if_true, if_false)`
    pub fn targets(&self) -> (&str, &str) {
        match self {
            Condition::FlagCheck {
                if_true, if_false, ..
            }
            | Condition::RelationshipCheck {
                if_true, if_false, ..
            }
            | Condition::AllianceCheck {
                if_true, if_false, ..
            } => (if_true, if_false),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Condition::FlagCheck { .. } => "flag_check",
            Condition::RelationshipCheck { .. } => "relationship_check",
            Condition::AllianceCheck { .. } => "alliance_check",
        }
    }
}

/// Declarative game-state mutations attached to a choice
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Effects {
    /// Character id to relationship delta
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alliances: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_wins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elimination_wins: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vote_history: Vec<VoteRecord>,
    /// Replaces the eliminated roster wholesale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eliminated: Option<Vec<String>>,
    /// Replaces the active roster wholesale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_players: Option<Vec<String>>,
}

/// An entry in the vote history
///
/// Fields beyond the common ones are kept as-is so content can record
/// whatever a given vote needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted_for: Option<String>,
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

/// A non-player character
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub starting_disposition: i32,
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>, starting_disposition: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            starting_disposition,
        }
    }
}

fn default_aliases() -> HashMap<String, String> {
    HashMap::from([("deej".to_string(), "DJ 'Deej' Slavin".to_string())])
}

/// Character lookup for speaker names and starting dispositions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterRegistry {
    #[serde(default)]
    pub npcs: Vec<Character>,
    /// Display names for speakers that are not part of the cast
    #[serde(default = "default_aliases")]
    pub aliases: HashMap<String, String>,
}

impl Default for CharacterRegistry {
    fn default() -> Self {
        Self {
            npcs: Vec::new(),
            aliases: default_aliases(),
        }
    }
}

impl CharacterRegistry {
    pub fn new(npcs: Vec<Character>) -> Self {
        Self {
            npcs,
            ..Default::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.npcs.iter().find(|npc| npc.id == id)
    }

    pub fn alias(&self, id: &str) -> Option<&str> {
        self.aliases.get(id).map(String::as_str)
    }
}

/// Zero-state shape of a new game, as authored in the content
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameStateTemplate {
    pub player_name: String,
    pub current_node: String,
    pub day: u32,
    pub episode: u32,
    pub relationships: BTreeMap<String, i32>,
    pub flags: BTreeMap<String, Value>,
    pub alliances: Vec<String>,
    pub challenge_wins: u32,
    pub elimination_wins: u32,
    pub vote_history: Vec<VoteRecord>,
    pub eliminated_players: Vec<String>,
    pub active_players: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kinds_parse_from_type_tag() {
        let json = r#"{
            "intro": {"type": "narrative", "day": 1, "episode": 1, "speaker": "deej", "text": "Welcome!", "next": "pick"},
            "pick": {"type": "choice", "text": "Who?", "choices": [
                {"text": "Jordan", "response_text": "Good call.", "effects": {"relationships": {"jordan": 10}}, "next": "check"}
            ]},
            "check": {"type": "branch", "condition": {"type": "relationship_check", "character": "jordan", "above": 25, "if_true": "win", "if_false": "lose"}},
            "win": {"type": "ending", "text": "You won."},
            "lose": {"type": "ending", "text": "You lost."}
        }"#;

        let nodes: HashMap<String, Node> = serde_json::from_str(json).unwrap();

        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes["intro"].kind.name(), "narrative");
        assert_eq!(nodes["intro"].day, Some(1));
        assert_eq!(nodes["intro"].targets(), vec!["pick"]);
        assert_eq!(nodes["check"].targets(), vec!["win", "lose"]);
        match &nodes["pick"].kind {
            NodeKind::Choice { choices } => {
                let effects = choices[0].effects.as_ref().unwrap();
                assert_eq!(effects.relationships["jordan"], 10);
            }
            other => panic!("Expected choice node, got {:?}", other),
        }
        assert_eq!(nodes["win"].kind, NodeKind::Ending);
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let json = r#"{"type": "minigame", "text": "?"}"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }

    #[test]
    fn unknown_condition_type_is_rejected() {
        let json = r#"{"type": "dice_check", "if_true": "a", "if_false": "b"}"#;
        assert!(serde_json::from_str::<Condition>(json).is_err());
    }

    #[test]
    fn negative_win_increment_is_rejected() {
        let json = r#"{"challenge_wins": -1}"#;
        assert!(serde_json::from_str::<Effects>(json).is_err());
    }

    #[test]
    fn registry_defaults_include_host_alias() {
        let registry: CharacterRegistry =
            serde_json::from_str(r#"{"npcs": [{"id": "jordan", "name": "Jordan"}]}"#).unwrap();

        assert_eq!(registry.get("jordan").unwrap().starting_disposition, 0);
        assert_eq!(registry.alias("deej"), Some("DJ 'Deej' Slavin"));
    }

    #[test]
    fn vote_record_keeps_extra_fields() {
        let record: VoteRecord =
            serde_json::from_str(r#"{"episode": 2, "voted_for": "riley", "votes_against": 3}"#)
                .unwrap();

        assert_eq!(record.voted_for.as_deref(), Some("riley"));
        assert_eq!(record.details["votes_against"], 3);
    }
}
