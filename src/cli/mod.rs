//! Terminal front end for the `gauntlet` binary

pub mod play;
pub mod terminal;
pub mod view_state;

pub use play::{PlayOptions, run_check, run_play};
pub use terminal::TerminalRenderer;
