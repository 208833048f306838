//! Output from interpreter execution

use crate::types::directive::{ChoiceItem, Directive};
use serde::{Deserialize, Serialize};

/// What the interpreter is suspended on after a call returns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Wait {
    /// Intro finished, the player must type a name
    PlayerName,
    /// Narrative shown, waiting for a single advance
    Advance,
    /// Choices shown, waiting for a pick in `1..=count`
    Choice { count: usize },
    /// Saved game found: 1 continues it, 2 starts over
    SavedGame,
    /// Ending shown: 1 plays again
    Restart,
    /// Nothing further happens until the caller redirects the story
    Halted,
}

/// Result of one interpreter call: directives to render, then a wait
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Output {
    pub directives: Vec<Directive>,
    pub wait: Wait,
}

impl Output {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            wait: Wait::Halted,
        }
    }

    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// All displayed text, in order
    pub fn texts(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::DisplayText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The most recently presented choice list
    pub fn choices(&self) -> Option<&[ChoiceItem]> {
        self.directives.iter().rev().find_map(|d| match d {
            Directive::PresentChoices { choices } => Some(choices.as_slice()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::Error { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
