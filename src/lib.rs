//! # gauntlet
//!
//! A narrative interpreter for branching interactive fiction. Content is a
//! JSON graph of narrative, choice, branch, and ending nodes; the
//! [`Interpreter`] walks it against a single mutable [`GameState`] and emits
//! renderer [`Directive`]s, suspending whenever the player has to act.
//!
//! ## Quick Start
//!
//! ```rust
//! use gauntlet::{EngineConfig, Event, Interpreter, MemoryStore, Persistence, Wait, loader};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let content = loader::from_json_str(r#"{
//!     "nodes": {
//!         "start": {"type": "narrative", "text": "Hello, [PLAYER_NAME].", "next": "end"},
//!         "end": {"type": "ending", "text": "Goodbye."}
//!     },
//!     "game_state_template": {"current_node": "start"}
//! }"#)?;
//!
//! let config = EngineConfig::default().instant();
//! let persistence = Persistence::new(Arc::new(MemoryStore::new()), config.saves.clone());
//! let mut interpreter = Interpreter::new(Arc::new(content), persistence, config);
//!
//! let output = interpreter.boot().await;
//! assert_eq!(output.wait, Wait::PlayerName);
//!
//! let output = interpreter.resume(Event::player_name("alex")).await?;
//! assert_eq!(output.texts(), vec!["Hello, ALEX."]);
//!
//! let output = interpreter.resume(Event::Advance).await?;
//! assert_eq!(output.wait, Wait::Restart);
//! # Ok(())
//! # }
//! ```
//!
//! To drive a story interactively, implement [`Renderer`] and hand both to a
//! [`Session`].

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod loader;
pub mod render;
pub mod runtime;
pub mod session;
pub mod status;
pub mod storage;
pub mod types;
pub mod validate;

pub use config::{EngineConfig, SaveConfig, TimingConfig};
pub use error::{ContentError, InterpreterError};
pub use render::{PlayerInput, Renderer};
pub use runtime::Interpreter;
pub use session::Session;
pub use status::StatusReport;
pub use storage::{JsonFileStore, MemoryStore, Persistence, SaveRecord, SaveStore, StorageError};
pub use types::{ContentGraph, Directive, Event, GameState, Output, Wait};
pub use validate::{ValidationReport, validate};
