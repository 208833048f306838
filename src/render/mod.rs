//! Renderer contract
//!
//! The interpreter only emits [`Directive`]s. A [`Renderer`] shows them and
//! collects the player's input at each suspension point; the
//! [`Session`](crate::session::Session) connects the two.

use crate::status::StatusReport;
use crate::types::{
    directive::{ChoiceItem, Directive, Header, TextStyle},
    event::Event,
};
use async_trait::async_trait;
use std::io;
use std::time::Duration;

pub mod typewriter;

pub use typewriter::{SkipSignal, Typewriter};

/// What the player did at a suspension point
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Input for the interpreter itself
    Event(Event),
    Save(u8),
    Load(u8),
    Status,
    Restart,
    Quit,
}

impl From<Event> for PlayerInput {
    fn from(event: Event) -> Self {
        PlayerInput::Event(event)
    }
}

/// Presentation surface for a play session
#[async_trait]
pub trait Renderer: Send {
    async fn display_text(&mut self, text: &str, style: TextStyle) -> io::Result<()>;

    async fn present_choices(&mut self, choices: &[ChoiceItem]) -> io::Result<()>;

    async fn clear_choices(&mut self) -> io::Result<()>;

    async fn update_header(&mut self, header: &Header) -> io::Result<()>;

    async fn show_ending_cue(&mut self) -> io::Result<()>;

    async fn show_divider(&mut self) -> io::Result<()>;

    async fn clear_output(&mut self) -> io::Result<()>;

    async fn set_continue_available(&mut self, available: bool) -> io::Result<()>;

    /// Story progression has stopped
    async fn show_error(&mut self, message: &str) -> io::Result<()>;

    /// Transient message such as "Saved to slot 1."
    async fn show_notice(&mut self, message: &str) -> io::Result<()>;

    async fn show_status(&mut self, report: &StatusReport) -> io::Result<()>;

    async fn await_advance(&mut self) -> io::Result<PlayerInput>;

    /// Choices `1..=count` are on screen
    async fn await_choice(&mut self, count: usize) -> io::Result<PlayerInput>;

    async fn await_player_name(&mut self) -> io::Result<PlayerInput>;
}

/// Carry out one directive
pub async fn play_directive<R: Renderer + ?Sized>(
    renderer: &mut R,
    directive: &Directive,
) -> io::Result<()> {
    match directive {
        Directive::ClearOutput => renderer.clear_output().await,
        Directive::UpdateHeader(header) => renderer.update_header(header).await,
        Directive::DisplayText { text, style } => renderer.display_text(text, *style).await,
        Directive::PresentChoices { choices } => renderer.present_choices(choices).await,
        Directive::ClearChoices => renderer.clear_choices().await,
        Directive::ContinueAvailable(available) => {
            renderer.set_continue_available(*available).await
        }
        Directive::Divider => renderer.show_divider().await,
        Directive::EndingCue => renderer.show_ending_cue().await,
        Directive::Delay { ms } => {
            if *ms > 0 {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            Ok(())
        }
        Directive::Error { message } => renderer.show_error(message).await,
    }
}
