//! Error types at the library boundaries

use crate::types::output::Wait;
use crate::validate::ValidationReport;
use thiserror::Error;

/// Content could not be loaded
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Content failed validation with {} error(s)", .report.error_count)]
    Invalid { report: ValidationReport },
}

/// The interpreter was resumed with input it is not waiting for
///
/// These leave the game state untouched; the caller can retry with valid
/// input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpreterError {
    #[error("Got {event} while waiting for {expected:?}")]
    UnexpectedEvent { event: &'static str, expected: Wait },

    #[error("Choice {index} is out of range 1..={count}")]
    InvalidChoice { index: usize, count: usize },

    #[error("Player name must not be empty")]
    EmptyPlayerName,
}
