//! Core types for the gauntlet library
//!
//! - Content: the immutable story graph and character registry
//! - State: the single mutable game-state record
//! - Event: player input that resumes the interpreter
//! - Directive / Output: what the renderer is told to do, and what the
//!   interpreter waits for next

pub mod content;
pub mod directive;
pub mod event;
pub mod output;
pub mod state;

pub use content::{
    Character, CharacterRegistry, Choice, Condition, ContentGraph, ContentMeta, Effects,
    GameStateTemplate, Node, NodeKind, VoteRecord,
};
pub use directive::{ChoiceItem, Directive, Header, TextStyle};
pub use event::Event;
pub use output::{Output, Wait};
pub use state::GameState;
