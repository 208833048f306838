//! Play session: interpreter output in, renderer input out

use crate::render::{PlayerInput, Renderer, play_directive};
use crate::runtime::Interpreter;
use crate::types::output::{Output, Wait};
use std::io;

/// Drives an [`Interpreter`] through a [`Renderer`] until the player quits
pub struct Session<R> {
    interpreter: Interpreter,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub fn new(interpreter: Interpreter, renderer: R) -> Self {
        Self {
            interpreter,
            renderer,
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (Interpreter, R) {
        (self.interpreter, self.renderer)
    }

    /// Boot the story and play it until [`PlayerInput::Quit`]
    pub async fn run(&mut self) -> io::Result<()> {
        let output = self.interpreter.boot().await;
        self.play(&output).await?;

        loop {
            let wait = self.interpreter.wait();
            let output = match self.await_input(wait).await? {
                PlayerInput::Quit => {
                    log::info!("player quit at '{}'", self.interpreter.state().current_node);
                    return Ok(());
                }
                PlayerInput::Event(_) if wait == Wait::Halted => {
                    self.renderer
                        .show_notice("The story has stopped. Load a save, restart, or quit.")
                        .await?;
                    continue;
                }
                PlayerInput::Event(event) => match self.interpreter.resume(event).await {
                    Ok(output) => output,
                    Err(e) => {
                        log::debug!("rejected input: {}", e);
                        self.renderer.show_notice(&e.to_string()).await?;
                        continue;
                    }
                },
                PlayerInput::Save(slot) => {
                    let notice = if self.interpreter.save_to_slot(slot).await {
                        format!("Saved to slot {}.", slot)
                    } else {
                        format!("Could not save to slot {}.", slot)
                    };
                    self.renderer.show_notice(&notice).await?;
                    continue;
                }
                PlayerInput::Load(slot) => match self.interpreter.load_from_slot(slot).await {
                    Some(output) => output,
                    None => {
                        self.renderer
                            .show_notice(&format!("Slot {} is empty.", slot))
                            .await?;
                        continue;
                    }
                },
                PlayerInput::Status => {
                    let report = self.interpreter.status();
                    self.renderer.show_status(&report).await?;
                    continue;
                }
                PlayerInput::Restart => self.interpreter.restart().await,
            };
            self.play(&output).await?;
        }
    }

    async fn play(&mut self, output: &Output) -> io::Result<()> {
        for directive in &output.directives {
            play_directive(&mut self.renderer, directive).await?;
        }
        Ok(())
    }

    async fn await_input(&mut self, wait: Wait) -> io::Result<PlayerInput> {
        match wait {
            Wait::PlayerName => self.renderer.await_player_name().await,
            Wait::Advance | Wait::Halted => self.renderer.await_advance().await,
            Wait::Choice { count } => self.renderer.await_choice(count).await,
            Wait::SavedGame => self.renderer.await_choice(2).await,
            Wait::Restart => self.renderer.await_choice(1).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::status::StatusReport;
    use crate::storage::{MemoryStore, Persistence};
    use crate::types::{
        content::ContentGraph,
        directive::{ChoiceItem, Header, TextStyle},
        event::Event,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Arc;

    const CONTENT: &str = r#"{
        "nodes": {
            "intro": {"type": "narrative", "day": 1, "episode": 1, "text": "Day one, [PLAYER_NAME].", "next": "pick"},
            "pick": {"type": "choice", "text": "Who do you trust?", "choices": [
                {"text": "Jordan", "effects": {"relationships": {"jordan": 10}}, "next": "end"},
                {"text": "Nobody", "next": "end"}
            ]},
            "end": {"type": "ending", "text": "Game over."}
        },
        "characters": {"npcs": [{"id": "jordan", "name": "Jordan"}]},
        "game_state_template": {"current_node": "intro", "relationships": {"jordan": 0}}
    }"#;

    /// Replays scripted input and records everything shown
    #[derive(Default)]
    struct Scripted {
        inputs: VecDeque<PlayerInput>,
        log: Vec<String>,
    }

    impl Scripted {
        fn new(inputs: impl IntoIterator<Item = PlayerInput>) -> Self {
            Self {
                inputs: inputs.into_iter().collect(),
                log: Vec::new(),
            }
        }

        fn next_input(&mut self, waiting: &str) -> io::Result<PlayerInput> {
            self.log.push(format!("await {}", waiting));
            Ok(self.inputs.pop_front().unwrap_or(PlayerInput::Quit))
        }

        fn shown(&self, prefix: &str) -> Vec<&str> {
            self.log
                .iter()
                .filter_map(|line| line.strip_prefix(prefix))
                .collect()
        }
    }

    #[async_trait]
    impl Renderer for Scripted {
        async fn display_text(&mut self, text: &str, _style: TextStyle) -> io::Result<()> {
            self.log.push(format!("text {}", text));
            Ok(())
        }

        async fn present_choices(&mut self, choices: &[ChoiceItem]) -> io::Result<()> {
            self.log.push(format!("choices {}", choices.len()));
            Ok(())
        }

        async fn clear_choices(&mut self) -> io::Result<()> {
            Ok(())
        }

        async fn update_header(&mut self, header: &Header) -> io::Result<()> {
            self.log.push(format!("header {}", header.day_label()));
            Ok(())
        }

        async fn show_ending_cue(&mut self) -> io::Result<()> {
            self.log.push("ending".to_string());
            Ok(())
        }

        async fn show_divider(&mut self) -> io::Result<()> {
            Ok(())
        }

        async fn clear_output(&mut self) -> io::Result<()> {
            Ok(())
        }

        async fn set_continue_available(&mut self, _available: bool) -> io::Result<()> {
            Ok(())
        }

        async fn show_error(&mut self, message: &str) -> io::Result<()> {
            self.log.push(format!("error {}", message));
            Ok(())
        }

        async fn show_notice(&mut self, message: &str) -> io::Result<()> {
            self.log.push(format!("notice {}", message));
            Ok(())
        }

        async fn show_status(&mut self, report: &StatusReport) -> io::Result<()> {
            self.log.push(format!("status {}", report.player_name));
            Ok(())
        }

        async fn await_advance(&mut self) -> io::Result<PlayerInput> {
            self.next_input("advance")
        }

        async fn await_choice(&mut self, count: usize) -> io::Result<PlayerInput> {
            self.next_input(&format!("choice {}", count))
        }

        async fn await_player_name(&mut self) -> io::Result<PlayerInput> {
            self.next_input("name")
        }
    }

    fn session(inputs: Vec<PlayerInput>) -> (Session<Scripted>, Arc<MemoryStore>) {
        session_with(CONTENT, inputs)
    }

    fn session_with(
        content: &str,
        inputs: Vec<PlayerInput>,
    ) -> (Session<Scripted>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = EngineConfig::default().instant();
        let persistence = Persistence::new(store.clone(), config.saves.clone());
        let content: ContentGraph = serde_json::from_str(content).unwrap();
        let interpreter = Interpreter::new(Arc::new(content), persistence, config);
        (Session::new(interpreter, Scripted::new(inputs)), store)
    }

    #[tokio::test]
    async fn plays_through_to_the_ending() {
        let (mut session, _store) = session(vec![
            Event::player_name("sam").into(),
            Event::Advance.into(),
            Event::choose(1).into(),
        ]);

        session.run().await.unwrap();

        let (interpreter, renderer) = session.into_parts();
        assert!(renderer.shown("text ").contains(&"Day one, SAM."));
        assert!(renderer.shown("text ").contains(&"Game over."));
        assert!(renderer.log.contains(&"ending".to_string()));
        assert_eq!(
            renderer.shown("await "),
            vec!["name", "advance", "choice 2", "choice 1"]
        );
        assert_eq!(interpreter.state().relationship("jordan"), 10);
    }

    #[tokio::test]
    async fn rejected_input_becomes_a_notice() {
        let (mut session, _store) = session(vec![
            Event::player_name(" ").into(),
            Event::player_name("sam").into(),
            Event::choose(1).into(),
        ]);

        session.run().await.unwrap();

        let renderer = session.renderer();
        assert_eq!(
            renderer.shown("notice "),
            vec!["Player name must not be empty", "Got choose while waiting for Advance"]
        );
        assert_eq!(session.interpreter().state().current_node, "intro");
    }

    #[tokio::test]
    async fn menu_commands_keep_the_current_wait() {
        let (mut session, _store) = session(vec![
            Event::player_name("sam").into(),
            PlayerInput::Save(1),
            PlayerInput::Status,
            PlayerInput::Load(2),
            PlayerInput::Save(9),
            Event::Advance.into(),
        ]);

        session.run().await.unwrap();

        let renderer = session.renderer();
        assert_eq!(
            renderer.shown("notice "),
            vec![
                "Saved to slot 1.",
                "Slot 2 is empty.",
                "Could not save to slot 9."
            ]
        );
        assert_eq!(renderer.shown("status "), vec!["SAM"]);
        assert_eq!(
            renderer.shown("await "),
            vec!["name", "advance", "advance", "advance", "advance", "advance", "choice 2"]
        );
    }

    #[tokio::test]
    async fn load_resumes_from_slot() {
        let (mut session, _store) = session(vec![
            Event::player_name("sam").into(),
            Event::Advance.into(),
            PlayerInput::Save(1),
            Event::choose(2).into(),
            PlayerInput::Load(1),
        ]);

        session.run().await.unwrap();

        assert_eq!(session.interpreter().state().current_node, "pick");
        assert_eq!(session.interpreter().wait(), Wait::Choice { count: 2 });
    }

    #[tokio::test]
    async fn restart_returns_to_the_name_prompt() {
        let (mut session, store) = session(vec![
            Event::player_name("sam").into(),
            PlayerInput::Restart,
        ]);

        session.run().await.unwrap();

        assert_eq!(session.interpreter().wait(), Wait::PlayerName);
        assert_eq!(session.interpreter().state().player(), None);
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn halted_story_only_accepts_commands() {
        let broken = r#"{
            "nodes": {"intro": {"type": "narrative", "text": "Hello.", "next": "missing"}},
            "game_state_template": {"current_node": "intro"}
        }"#;
        let (mut session, _store) = session_with(
            broken,
            vec![
                Event::player_name("sam").into(),
                Event::Advance.into(),
                Event::Advance.into(),
                PlayerInput::Restart,
            ],
        );

        session.run().await.unwrap();

        let renderer = session.renderer();
        assert_eq!(
            renderer.shown("error "),
            vec!["Game error: Node \"missing\" not found."]
        );
        assert_eq!(
            renderer.shown("notice "),
            vec!["The story has stopped. Load a save, restart, or quit."]
        );
        assert_eq!(session.interpreter().wait(), Wait::PlayerName);
    }
}
