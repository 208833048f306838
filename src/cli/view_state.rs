//! View state for the terminal renderer
//!
//! Tracks what is already on screen so that repeated directives only print
//! when something actually changed.

use crate::types::directive::Header;
use std::io::{self, Write};

/// Clear the terminal screen
pub fn clear_screen(out: &mut dyn Write) -> io::Result<()> {
    write!(out, "\x1b[2J\x1b[H")?;
    out.flush()
}

/// Current visual state of the terminal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Last header printed since the screen was cleared
    pub header: Option<Header>,
    /// Whether Enter currently advances the story
    pub continue_available: bool,
    /// Number of choices currently listed
    pub choices: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `header`; `true` if it differs from what is on screen
    pub fn apply_header(&mut self, header: Header) -> bool {
        if self.header == Some(header) {
            return false;
        }
        self.header = Some(header);
        true
    }

    /// Forget everything after the screen is wiped
    pub fn cleared(&mut self) {
        self.header = None;
        self.choices = 0;
    }
}

/// Header line as printed above the story text
pub fn header_line(header: &Header) -> String {
    format!(
        "== {} | {} | {} ==",
        header.day_label(),
        header.episode_label(),
        header.players_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(day: u32) -> Header {
        Header {
            day,
            episode: 1,
            active_players: 12,
        }
    }

    #[test]
    fn test_empty_view_state() {
        let view = ViewState::new();
        assert_eq!(view.header, None);
        assert!(!view.continue_available);
        assert_eq!(view.choices, 0);
    }

    #[test]
    fn test_header_change() {
        let mut view = ViewState::new();
        assert!(view.apply_header(header(1)));
        assert!(view.apply_header(header(2)));
    }

    #[test]
    fn test_no_change_on_same_header() {
        let mut view = ViewState::new();
        view.apply_header(header(1));
        assert!(!view.apply_header(header(1)));
    }

    #[test]
    fn test_header_reprinted_after_clear() {
        let mut view = ViewState::new();
        view.apply_header(header(1));
        view.choices = 3;

        view.cleared();

        assert_eq!(view.choices, 0);
        assert!(view.apply_header(header(1)));
    }

    #[test]
    fn test_header_line() {
        assert_eq!(header_line(&header(3)), "== DAY 3 | EPISODE 1 | 12 PLAYERS ==");
    }
}
