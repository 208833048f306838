//! Condition/effect engine
//!
//! Pure evaluation of branch conditions and application of choice effects
//! against [`GameState`](crate::types::GameState). Nothing here renders or
//! persists.

pub mod condition;
pub mod effects;

pub use condition::{ConditionError, evaluate, resolve};
pub use effects::apply_effects;
