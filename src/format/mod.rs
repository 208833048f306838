//! Text formatting applied before text reaches the renderer
//!
//! Placeholders are substituted in a single left-to-right pass, so a player
//! name that happens to look like a placeholder is never expanded again.

use crate::types::{content::CharacterRegistry, state::GameState};

pub mod markup;

/// Fallback for `[PLAYER_NAME]` before the intro has completed
pub const DEFAULT_PLAYER_NAME: &str = "Player";
/// Fallback for the `player` speaker before the intro has completed
pub const DEFAULT_PLAYER_SPEAKER: &str = "You";

const PLAYER_NAME: &str = "[PLAYER_NAME]";
const PLAYER: &str = "[PLAYER]";
const CHALLENGE_WINS: &str = "[CHALLENGE_WINS]";
const ELIMINATION_WINS: &str = "[ELIMINATION_WINS]";

/// Formats node text against the live state
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter<'a> {
    state: &'a GameState,
    characters: &'a CharacterRegistry,
}

impl<'a> TextFormatter<'a> {
    pub fn new(state: &'a GameState, characters: &'a CharacterRegistry) -> Self {
        Self { state, characters }
    }

    /// Replace every placeholder token with its live value
    pub fn substitute(&self, text: &str) -> String {
        let name = self.state.player().unwrap_or(DEFAULT_PLAYER_NAME);
        let challenge_wins = self.state.challenge_wins.to_string();
        let elimination_wins = self.state.elimination_wins.to_string();
        let tokens: [(&str, &str); 4] = [
            (PLAYER_NAME, name),
            (PLAYER, name),
            (CHALLENGE_WINS, &challenge_wins),
            (ELIMINATION_WINS, &elimination_wins),
        ];

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('[') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            match tokens.iter().find(|(token, _)| tail.starts_with(token)) {
                Some((token, value)) => {
                    out.push_str(value);
                    rest = &tail[token.len()..];
                }
                None => {
                    out.push('[');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Narrative and choice text, prefixed with the speaker when there is one
    pub fn node_text(&self, text: &str, speaker: Option<&str>) -> String {
        let body = self.substitute(text);
        match speaker {
            Some(id) => format!("[{}]: {}", self.speaker_name(id).to_uppercase(), body),
            None => body,
        }
    }

    /// Ending text never carries a speaker prefix
    pub fn ending_text(&self, text: &str) -> String {
        self.substitute(text)
    }

    /// Display name for a speaker id
    ///
    /// `player` is the player; then the cast, then known aliases, then the id
    /// itself.
    pub fn speaker_name(&self, id: &str) -> String {
        if id == "player" {
            return self
                .state
                .player()
                .unwrap_or(DEFAULT_PLAYER_SPEAKER)
                .to_string();
        }
        if let Some(npc) = self.characters.get(id) {
            return npc.name.clone();
        }
        if let Some(alias) = self.characters.alias(id) {
            return alias.to_string();
        }
        id.to_string()
    }
}
