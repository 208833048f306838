//! Choice effect application

use crate::types::{content::Effects, state::GameState};

/// Apply every present field of `effects` to `state`
///
/// Relationship deltas are clamped after addition and skip characters the
/// state does not track. Flags merge key by key. Alliances are only added
/// once. Rosters are replaced wholesale. Win counters add whenever the field
/// is present.
pub fn apply_effects(state: &mut GameState, effects: &Effects) {
    for (character, delta) in &effects.relationships {
        if state.adjust_relationship(character, *delta) {
            log::trace!(
                "relationship {} {:+} -> {}",
                character,
                delta,
                state.relationship(character)
            );
        } else {
            log::trace!("ignoring relationship delta for untracked '{}'", character);
        }
    }

    for (name, value) in &effects.flags {
        state.set_flag(name.clone(), value.clone());
    }

    for alliance in &effects.alliances {
        state.add_alliance(alliance);
    }

    if let Some(wins) = effects.challenge_wins {
        state.challenge_wins = state.challenge_wins.saturating_add(wins);
    }

    if let Some(wins) = effects.elimination_wins {
        state.elimination_wins = state.elimination_wins.saturating_add(wins);
    }

    state
        .vote_history
        .extend(effects.vote_history.iter().cloned());

    if let Some(eliminated) = &effects.eliminated {
        state.eliminated_players = eliminated.clone();
    }

    if let Some(active) = &effects.active_players {
        state.active_players = active.clone();
    }
}
