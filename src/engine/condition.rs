//! Branch condition evaluation

use crate::types::{content::Condition, state::GameState};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConditionError {
    #[error("relationship_check on '{character}' has neither 'above' nor 'below'")]
    MissingBound { character: String },
}

/// Decide whether a condition holds for the given state
///
/// A relationship check with both bounds uses `above`.
pub fn evaluate(condition: &Condition, state: &GameState) -> Result<bool, ConditionError> {
    match condition {
        Condition::FlagCheck { flag, .. } => Ok(state.flag(flag).is_some_and(is_truthy)),
        Condition::RelationshipCheck {
            character,
            above,
            below,
            ..
        } => {
            let value = state.relationship(character);
            match (above, below) {
                (Some(above), _) => Ok(value > *above),
                (None, Some(below)) => Ok(value < *below),
                (None, None) => Err(ConditionError::MissingBound {
                    character: character.clone(),
                }),
            }
        }
        Condition::AllianceCheck { alliance, .. } => Ok(state.has_alliance(alliance)),
    }
}

/// Pick the node id a condition routes to
pub fn resolve<'a>(condition: &'a Condition, state: &GameState) -> Result<&'a str, ConditionError> {
    let (if_true, if_false) = condition.targets();
    Ok(if evaluate(condition, state)? {
        if_true
    } else {
        if_false
    })
}

/// Truthiness of a flag value: false, null, zero, and empty strings are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
