//! Terminal renderer
//!
//! Stdin is read line by line on a background thread. Enter while text is
//! being revealed skips the rest of that text instead of advancing the story.

use crate::cli::view_state::{ViewState, clear_screen, header_line};
use crate::config::TimingConfig;
use crate::format::markup::{Span, spans};
use crate::render::{PlayerInput, Renderer, Typewriter};
use crate::status::StatusReport;
use crate::types::{
    directive::{ChoiceItem, Header, TextStyle},
    event::Event,
};
use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tokio::sync::mpsc;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[1;33m";
const MAGENTA: &str = "\x1b[1;35m";
const CYAN: &str = "\x1b[36m";

const COMMAND_HELP: &str = "Commands: :save N, :load N, :status, :restart, q";

/// Renders to a terminal and reads player input line by line
pub struct TerminalRenderer {
    typewriter: Typewriter,
    logo_line_delay: Duration,
    lines: mpsc::UnboundedReceiver<String>,
    eof: bool,
    out: Box<dyn Write + Send>,
    view: ViewState,
}

impl TerminalRenderer {
    /// Stdout and stdin
    pub fn new(timing: &TimingConfig) -> Self {
        Self::with_io(timing, spawn_stdin_reader(), Box::new(io::stdout()))
    }

    /// Input lines from `lines`, output to `out`
    pub fn with_io(
        timing: &TimingConfig,
        lines: mpsc::UnboundedReceiver<String>,
        out: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            typewriter: Typewriter::from_timing(timing),
            logo_line_delay: Duration::from_millis(timing.logo_line_delay),
            lines,
            eof: false,
            out,
            view: ViewState::new(),
        }
    }

    async fn next_line(&mut self) -> Option<String> {
        if self.eof {
            return None;
        }
        let line = self.lines.recv().await;
        if line.is_none() {
            self.eof = true;
        }
        line
    }

    /// Trimmed input line; `None` once input is closed
    async fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !prompt.is_empty() {
            write!(self.out, "{} ", prompt)?;
            self.out.flush()?;
        }
        Ok(self.next_line().await.map(|line| line.trim().to_string()))
    }

    /// Typewriter reveal; an input line arriving meanwhile sets the skip signal
    ///
    /// The signal is left set, so later pieces of the same text come out
    /// whole as well.
    async fn reveal(&mut self, text: &str) {
        let Self {
            typewriter,
            lines,
            eof,
            out,
            ..
        } = self;
        let skip = typewriter.skip_signal();

        let reveal = typewriter.reveal(text, |chunk| {
            let _ = out.write_all(chunk.as_bytes());
            let _ = out.flush();
        });
        tokio::pin!(reveal);

        while !*eof {
            tokio::select! {
                biased;
                _ = &mut reveal => return,
                line = lines.recv() => {
                    if line.is_none() {
                        *eof = true;
                    }
                    skip.skip();
                }
            }
        }
        reveal.await;
    }

    async fn reveal_logo(&mut self, logo: &str) -> io::Result<()> {
        for line in logo.lines() {
            writeln!(self.out, "{}{}{}", CYAN, line, RESET)?;
            self.out.flush()?;
            if !self.logo_line_delay.is_zero() {
                tokio::time::sleep(self.logo_line_delay).await;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Renderer for TerminalRenderer {
    async fn display_text(&mut self, text: &str, style: TextStyle) -> io::Result<()> {
        if style == TextStyle::Logo {
            return self.reveal_logo(text).await;
        }

        self.typewriter.skip_signal().reset();
        let base = match style {
            TextStyle::Highlight => BOLD,
            TextStyle::Response => ITALIC,
            TextStyle::Ending => MAGENTA,
            _ => "",
        };
        for span in spans(text) {
            let (code, piece) = match span {
                Span::Text(piece) => (base, piece),
                Span::Speaker(tag) => (YELLOW, tag),
                Span::Emphasis(inner) => (ITALIC, inner),
                Span::LineBreak => ("", "\n".to_string()),
            };
            write!(self.out, "{}", code)?;
            self.reveal(&piece).await;
            if !code.is_empty() {
                write!(self.out, "{}", RESET)?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    async fn present_choices(&mut self, choices: &[ChoiceItem]) -> io::Result<()> {
        writeln!(self.out)?;
        for choice in choices {
            writeln!(self.out, "  {}{}.{} {}", BOLD, choice.index, RESET, choice.label)?;
        }
        writeln!(self.out)?;
        self.view.choices = choices.len();
        Ok(())
    }

    async fn clear_choices(&mut self) -> io::Result<()> {
        self.view.choices = 0;
        Ok(())
    }

    async fn update_header(&mut self, header: &Header) -> io::Result<()> {
        if self.view.apply_header(*header) {
            writeln!(self.out, "{}{}{}", DIM, header_line(header), RESET)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    async fn show_ending_cue(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}*  *  *{}", MAGENTA, RESET)?;
        writeln!(self.out)?;
        Ok(())
    }

    async fn show_divider(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}{}{}", DIM, "-".repeat(40), RESET)?;
        writeln!(self.out)?;
        Ok(())
    }

    async fn clear_output(&mut self) -> io::Result<()> {
        clear_screen(&mut self.out)?;
        self.view.cleared();
        Ok(())
    }

    async fn set_continue_available(&mut self, available: bool) -> io::Result<()> {
        self.view.continue_available = available;
        Ok(())
    }

    async fn show_error(&mut self, message: &str) -> io::Result<()> {
        eprintln!("{}{}{}", RED, message, RESET);
        Ok(())
    }

    async fn show_notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "[{}]", message)?;
        Ok(())
    }

    async fn show_status(&mut self, report: &StatusReport) -> io::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", report)?;
        writeln!(self.out)?;
        Ok(())
    }

    async fn await_advance(&mut self) -> io::Result<PlayerInput> {
        loop {
            let prompt = if self.view.continue_available {
                "[Enter]"
            } else {
                ">"
            };
            let Some(input) = self.prompt(prompt).await? else {
                return Ok(PlayerInput::Quit);
            };
            if input.is_empty() {
                return Ok(Event::Advance.into());
            }
            match parse_command(&input) {
                Some(command) => return Ok(command),
                None => writeln!(self.out, "Press Enter to continue. {}", COMMAND_HELP)?,
            }
        }
    }

    async fn await_choice(&mut self, count: usize) -> io::Result<PlayerInput> {
        loop {
            let Some(input) = self.prompt(&format!("Select (1-{}):", count)).await? else {
                return Ok(PlayerInput::Quit);
            };
            if let Some(command) = parse_command(&input) {
                return Ok(command);
            }
            match input.parse::<usize>() {
                Ok(index) if (1..=count).contains(&index) => {
                    return Ok(Event::choose(index).into());
                }
                _ => writeln!(self.out, "Invalid choice. Enter 1-{}. {}", count, COMMAND_HELP)?,
            }
        }
    }

    async fn await_player_name(&mut self) -> io::Result<PlayerInput> {
        let Some(input) = self.prompt("Enter your name:").await? else {
            return Ok(PlayerInput::Quit);
        };
        Ok(parse_command(&input).unwrap_or_else(|| Event::player_name(input).into()))
    }
}

/// Menu commands accepted at any prompt
pub fn parse_command(input: &str) -> Option<PlayerInput> {
    let mut words = input.split_whitespace();
    let command = match words.next()? {
        "q" | ":quit" => PlayerInput::Quit,
        ":status" => PlayerInput::Status,
        ":restart" => PlayerInput::Restart,
        ":save" => PlayerInput::Save(words.next()?.parse().ok()?),
        ":load" => PlayerInput::Load(words.next()?.parse().ok()?),
        _ => return None,
    };
    words.next().is_none().then_some(command)
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("stdin closed: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    /// Output sink the test can read back
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn terminal(
        typewriter_speed: u64,
    ) -> (TerminalRenderer, mpsc::UnboundedSender<String>, Captured) {
        let timing = TimingConfig {
            typewriter_speed,
            ..TimingConfig::instant()
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let out = Captured::default();
        let renderer = TerminalRenderer::with_io(&timing, rx, Box::new(out.clone()));
        (renderer, tx, out)
    }

    #[tokio::test]
    async fn one_enter_skips_every_span_of_the_text() {
        let (mut renderer, tx, out) = terminal(20);
        tx.send(String::new()).unwrap();
        let text = format!("[JORDAN]: {}", "x".repeat(50));

        let started = Instant::now();
        renderer.display_text(&text, TextStyle::Body).await.unwrap();

        assert!(started.elapsed() < Duration::from_millis(200));
        let shown = out.text();
        assert!(shown.contains("[JORDAN]:"));
        assert!(shown.contains(&"x".repeat(50)));
    }

    #[tokio::test]
    async fn skipping_does_not_carry_into_the_next_text() {
        let (mut renderer, tx, _out) = terminal(20);
        tx.send(String::new()).unwrap();
        renderer.display_text("[JORDAN]: first", TextStyle::Body).await.unwrap();

        let started = Instant::now();
        renderer.display_text("abcd", TextStyle::Body).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn instant_text_leaves_queued_input_for_the_prompt() {
        let (mut renderer, tx, out) = terminal(0);
        tx.send("2".to_string()).unwrap();

        renderer.display_text("Pick one.", TextStyle::Body).await.unwrap();
        let input = renderer.await_choice(2).await.unwrap();

        assert_eq!(input, PlayerInput::Event(Event::choose(2)));
        assert!(out.text().contains("Pick one."));
    }

    #[tokio::test]
    async fn invalid_choices_are_asked_again() {
        let (mut renderer, tx, out) = terminal(0);
        tx.send("7".to_string()).unwrap();
        tx.send(":save 1".to_string()).unwrap();

        let input = renderer.await_choice(3).await.unwrap();

        assert_eq!(input, PlayerInput::Save(1));
        assert!(out.text().contains("Invalid choice. Enter 1-3."));
    }

    #[tokio::test]
    async fn closed_input_quits() {
        let (mut renderer, tx, _out) = terminal(0);
        drop(tx);

        assert_eq!(renderer.await_advance().await.unwrap(), PlayerInput::Quit);
        assert_eq!(renderer.await_player_name().await.unwrap(), PlayerInput::Quit);
    }

    #[tokio::test]
    async fn unchanged_header_prints_once() {
        let (mut renderer, _tx, out) = terminal(0);
        let header = Header {
            day: 2,
            episode: 3,
            active_players: 5,
        };

        renderer.update_header(&header).await.unwrap();
        renderer.update_header(&header).await.unwrap();

        let shown = out.text();
        assert_eq!(shown.matches("== DAY 2 | EPISODE 3 | 5 PLAYERS ==").count(), 1);
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command("q"), Some(PlayerInput::Quit));
        assert_eq!(parse_command(":status"), Some(PlayerInput::Status));
        assert_eq!(parse_command(":restart"), Some(PlayerInput::Restart));
        assert_eq!(parse_command(":save 2"), Some(PlayerInput::Save(2)));
        assert_eq!(parse_command("  :load   3 "), Some(PlayerInput::Load(3)));
    }

    #[test]
    fn non_commands_are_left_alone() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("2"), None);
        assert_eq!(parse_command("quinn"), None);
        assert_eq!(parse_command(":save"), None);
        assert_eq!(parse_command(":save two"), None);
        assert_eq!(parse_command(":load 1 2"), None);
    }
}
