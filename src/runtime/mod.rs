//! Node interpreter: the story state machine
//!
//! An [`Interpreter`] owns the live [`GameState`] and walks the content graph.
//! Every call returns an [`Output`]: the directives to render, then the
//! [`Wait`] the interpreter is suspended on. The caller resumes it with an
//! [`Event`]; an event that does not belong to the active wait is rejected
//! without touching state.
//!
//! Branch nodes never suspend. Narrative, choice, and ending nodes always do,
//! unless a content error halts the story first.

use crate::config::EngineConfig;
use crate::engine;
use crate::error::InterpreterError;
use crate::format::TextFormatter;
use crate::status::StatusReport;
use crate::storage::{Persistence, SaveRecord, SlotSummary};
use crate::types::{
    content::{Choice, ContentGraph, Node, NodeKind},
    directive::{ChoiceItem, Directive, Header, TextStyle},
    event::Event,
    output::{Output, Wait},
    state::GameState,
};
use std::sync::Arc;


const CONTINUE_SAVED_GAME: usize = 1;
const START_NEW_GAME: usize = 2;

/// What the interpreter needs to resume
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    PlayerName,
    Advance { next: Option<String> },
    Choice { node_id: String, count: usize },
    SavedGame,
    Restart,
    Halted,
}

impl Pending {
    fn wait(&self) -> Wait {
        match self {
            Pending::PlayerName => Wait::PlayerName,
            Pending::Advance { .. } => Wait::Advance,
            Pending::Choice { count, .. } => Wait::Choice { count: *count },
            Pending::SavedGame => Wait::SavedGame,
            Pending::Restart => Wait::Restart,
            Pending::Halted => Wait::Halted,
        }
    }
}

/// Single controller for a play session
pub struct Interpreter {
    content: Arc<ContentGraph>,
    state: GameState,
    persistence: Persistence,
    config: EngineConfig,
    pending: Pending,
}

impl Interpreter {
    /// Interpreter holding a fresh game; call [`boot`](Self::boot) or
    /// [`start_new_game`](Self::start_new_game) to begin
    pub fn new(content: Arc<ContentGraph>, persistence: Persistence, config: EngineConfig) -> Self {
        let state = GameState::from_template(&content.game_state_template, &content.characters);
        Self {
            content,
            state,
            persistence,
            config,
            pending: Pending::Halted,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn content(&self) -> &ContentGraph {
        &self.content
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// What the interpreter is currently waiting for
    pub fn wait(&self) -> Wait {
        self.pending.wait()
    }

    /// Header for the current state; an empty roster shows the full cast
    pub fn header(&self) -> Header {
        let active_players = match self.state.active_players.len() {
            0 => self.content.meta.cast_size,
            n => n,
        };
        Header {
            day: self.state.day,
            episode: self.state.episode,
            active_players,
        }
    }

    pub fn status(&self) -> StatusReport {
        StatusReport::new(&self.state, &self.content.characters)
    }

    /// Offer the autosave if there is one, otherwise start a new game
    pub async fn boot(&mut self) -> Output {
        match self.persistence.load_auto_save().await {
            Some(record) => self.offer_saved_game(&record),
            None => self.start_new_game().await,
        }
    }

    /// Fresh state, intro, then wait for the player's name
    pub async fn start_new_game(&mut self) -> Output {
        self.state = GameState::from_template(
            &self.content.game_state_template,
            &self.content.characters,
        );
        log::info!("new game at '{}'", self.state.current_node);

        let timing = &self.config.timing;
        let meta = &self.content.meta;
        let mut out = Output::new();
        out.push(Directive::ClearChoices);
        out.push(Directive::ClearOutput);
        if let Some(logo) = &meta.logo {
            out.push(Directive::text(logo.clone(), TextStyle::Logo));
        }
        out.push(Directive::Delay {
            ms: timing.intro_pause,
        });
        out.push(Directive::text(
            format!("\n\nWelcome to {}.\n", meta.title),
            TextStyle::Body,
        ));
        out.push(Directive::Delay {
            ms: timing.intro_line_pause,
        });
        out.push(Directive::text(format!("{}\n", meta.tagline), TextStyle::Body));
        out.push(Directive::Delay {
            ms: timing.intro_pause,
        });

        self.suspend(&mut out, Pending::PlayerName);
        out
    }

    /// Drop the autosave and start over
    pub async fn restart(&mut self) -> Output {
        self.persistence.clear_auto_save().await;
        self.start_new_game().await
    }

    /// Resume from the active wait
    pub async fn resume(&mut self, event: Event) -> Result<Output, InterpreterError> {
        match (self.pending.clone(), event) {
            (Pending::PlayerName, Event::PlayerName { name }) => self.submit_player_name(&name).await,
            (Pending::Advance { next }, Event::Advance) => Ok(self.advance(next).await),
            (Pending::Choice { node_id, count }, Event::Choose { index }) => {
                check_choice(index, count)?;
                Ok(self.select_choice(&node_id, index).await)
            }
            (Pending::SavedGame, Event::Choose { index }) => match index {
                CONTINUE_SAVED_GAME => Ok(self.continue_saved_game().await),
                START_NEW_GAME => Ok(self.start_new_game().await),
                _ => Err(InterpreterError::InvalidChoice { index, count: 2 }),
            },
            (Pending::Restart, Event::Choose { index }) => {
                check_choice(index, 1)?;
                Ok(self.start_new_game().await)
            }
            (pending, event) => Err(InterpreterError::UnexpectedEvent {
                event: event.name(),
                expected: pending.wait(),
            }),
        }
    }

    /// Jump to a node and run until the story suspends or halts
    ///
    /// A missing id reports a content error and halts without touching state.
    pub async fn process_node(&mut self, id: &str) -> Output {
        let mut out = Output::new();
        self.enter(id, &mut out).await;
        out
    }

    pub async fn save_to_slot(&self, slot: u8) -> bool {
        self.persistence.save_to_slot(slot, &self.state).await
    }

    /// Replace the live state with a slot's and resume there
    ///
    /// `None` when the slot is empty or unreadable; the session carries on.
    pub async fn load_from_slot(&mut self, slot: u8) -> Option<Output> {
        let record = self.persistence.load_from_slot(slot).await?;
        Some(self.load_record(record).await)
    }

    pub async fn list_slots(&self) -> Vec<SlotSummary> {
        self.persistence.list_slots().await
    }

    async fn submit_player_name(&mut self, name: &str) -> Result<Output, InterpreterError> {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(InterpreterError::EmptyPlayerName);
        }
        log::info!("player name set to {}", name);
        self.state.player_name = name;

        let mut out = Output::new();
        out.push(Directive::ClearOutput);
        let start = self.state.current_node.clone();
        self.enter(&start, &mut out).await;
        Ok(out)
    }

    fn offer_saved_game(&mut self, record: &SaveRecord) -> Output {
        let saved = &record.state;
        let mut out = Output::new();
        out.push(Directive::ClearOutput);
        out.push(Directive::text("SAVED GAME FOUND\n\n", TextStyle::Highlight));
        out.push(Directive::text(
            format!(
                "Day {}, Episode {}\nPlayer: {}\n\n",
                saved.day, saved.episode, saved.player_name
            ),
            TextStyle::Body,
        ));
        out.push(Directive::PresentChoices {
            choices: ChoiceItem::numbered(["Continue saved game", "Start new game"]),
        });
        self.suspend(&mut out, Pending::SavedGame);
        out
    }

    async fn continue_saved_game(&mut self) -> Output {
        match self.persistence.load_auto_save().await {
            Some(record) => self.load_record(record).await,
            None => {
                log::warn!("autosave vanished before it could be continued");
                self.start_new_game().await
            }
        }
    }

    async fn load_record(&mut self, record: SaveRecord) -> Output {
        self.state = record.state;
        log::info!(
            "loaded save from {} at '{}'",
            record.timestamp,
            self.state.current_node
        );

        let mut out = Output::new();
        out.push(Directive::ClearChoices);
        out.push(Directive::ClearOutput);
        out.push(Directive::UpdateHeader(self.header()));
        let current = self.state.current_node.clone();
        self.enter(&current, &mut out).await;
        out
    }

    async fn advance(&mut self, next: Option<String>) -> Output {
        let mut out = Output::new();
        out.push(Directive::ContinueAvailable(false));
        match next {
            Some(next) => self.enter(&next, &mut out).await,
            None => {
                log::debug!("'{}' has no next node; halting", self.state.current_node);
                self.suspend(&mut out, Pending::Halted);
            }
        }
        out
    }

    async fn select_choice(&mut self, node_id: &str, index: usize) -> Output {
        let content = Arc::clone(&self.content);
        let mut out = Output::new();
        out.push(Directive::ClearChoices);

        let Some(choice) = content.node(node_id).and_then(|node| match &node.kind {
            NodeKind::Choice { choices } => choices.get(index - 1),
            _ => None,
        }) else {
            self.content_error(&mut out, format!("Choice {} of \"{}\" not found.", index, node_id));
            return out;
        };
        log::debug!("'{}' choice {}: {}", node_id, index, choice.text);

        if let Some(response) = &choice.response_text {
            let text = self.formatter().substitute(response);
            out.push(Directive::text(text, TextStyle::Response));
        }
        if let Some(effects) = &choice.effects {
            engine::apply_effects(&mut self.state, effects);
        }

        match &choice.next {
            Some(next) => {
                out.push(Directive::Delay {
                    ms: self.config.timing.line_delay,
                });
                out.push(Directive::Divider);
                self.enter(next, &mut out).await;
            }
            None => self.suspend(&mut out, Pending::Halted),
        }
        out
    }

    /// Process `id` and any branch chain after it
    async fn enter(&mut self, id: &str, out: &mut Output) {
        let content = Arc::clone(&self.content);
        let mut id = id;
        let mut hops = 0usize;

        loop {
            let Some(node) = content.node(id) else {
                self.content_error(out, format!("Node \"{}\" not found.", id));
                return;
            };
            log::debug!("entering {} node '{}'", node.kind.name(), id);

            self.state.current_node = id.to_string();
            if let Some(day) = node.day {
                self.state.day = day;
            }
            if let Some(episode) = node.episode {
                self.state.episode = episode;
            }
            out.push(Directive::UpdateHeader(self.header()));

            if node.is_checkpoint() {
                self.persistence.auto_save(&self.state).await;
            }

            match &node.kind {
                NodeKind::Narrative { next } => {
                    self.show_narrative(node, next.clone(), out);
                    return;
                }
                NodeKind::Choice { choices } => {
                    self.show_choices(node, choices, out);
                    return;
                }
                NodeKind::Ending => {
                    self.show_ending(node, out).await;
                    return;
                }
                NodeKind::Branch { condition } => {
                    hops += 1;
                    if hops > self.config.branch_hop_limit {
                        self.content_error(
                            out,
                            format!("Branch cycle detected at \"{}\".", id),
                        );
                        return;
                    }
                    id = match engine::resolve(condition, &self.state) {
                        Ok(target) => target,
                        Err(e) => {
                            log::error!("branch '{}': {}; taking if_false", id, e);
                            condition.targets().1
                        }
                    };
                    log::debug!("branch routed to '{}'", id);
                }
            }
        }
    }

    fn show_narrative(&mut self, node: &Node, next: Option<String>, out: &mut Output) {
        let text = self.formatter().node_text(&node.text, node.speaker.as_deref());
        out.push(Directive::ClearChoices);
        out.push(Directive::text(text, TextStyle::Body));
        out.push(Directive::ContinueAvailable(true));
        self.suspend(out, Pending::Advance { next });
    }

    fn show_choices(&mut self, node: &Node, choices: &[Choice], out: &mut Output) {
        let text = self.formatter().node_text(&node.text, node.speaker.as_deref());
        out.push(Directive::ClearChoices);
        out.push(Directive::text(text, TextStyle::Body));
        out.push(Directive::Delay {
            ms: self.config.timing.choice_delay,
        });
        out.push(Directive::PresentChoices {
            choices: ChoiceItem::numbered(choices.iter().map(|c| c.text.clone())),
        });
        self.suspend(
            out,
            Pending::Choice {
                node_id: self.state.current_node.clone(),
                count: choices.len(),
            },
        );
    }

    async fn show_ending(&mut self, node: &Node, out: &mut Output) {
        let timing = &self.config.timing;
        out.push(Directive::ClearChoices);
        out.push(Directive::EndingCue);
        out.push(Directive::Delay {
            ms: timing.ending_cue,
        });
        out.push(Directive::text(
            self.formatter().ending_text(&node.text),
            TextStyle::Ending,
        ));
        out.push(Directive::Delay {
            ms: timing.ending_delay,
        });
        out.push(Directive::PresentChoices {
            choices: ChoiceItem::numbered(["Play Again"]),
        });

        self.persistence.clear_auto_save().await;
        log::info!("reached ending '{}'", self.state.current_node);
        self.suspend(out, Pending::Restart);
    }

    fn content_error(&mut self, out: &mut Output, message: String) {
        log::error!("Game error: {}", message);
        out.push(Directive::error(format!("Game error: {}", message)));
        self.suspend(out, Pending::Halted);
    }

    fn suspend(&mut self, out: &mut Output, pending: Pending) {
        out.wait = pending.wait();
        self.pending = pending;
    }

    fn formatter(&self) -> TextFormatter<'_> {
        TextFormatter::new(&self.state, &self.content.characters)
    }
}

fn check_choice(index: usize, count: usize) -> Result<(), InterpreterError> {
    if (1..=count).contains(&index) {
        Ok(())
    } else {
        Err(InterpreterError::InvalidChoice { index, count })
    }
}
