//! `play` and `check` commands

use crate::{
    cli::terminal::TerminalRenderer,
    config::EngineConfig,
    loader,
    runtime::Interpreter,
    session::Session,
    storage::{JsonFileStore, Persistence},
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings for an interactive run
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub content: PathBuf,
    pub save_dir: PathBuf,
    pub config: Option<PathBuf>,
    /// Remove every delay and reveal text instantly
    pub fast: bool,
}

impl PlayOptions {
    pub fn new(content: impl Into<PathBuf>) -> Self {
        Self {
            content: content.into(),
            save_dir: PathBuf::from("saves"),
            config: None,
            fast: false,
        }
    }
}

/// Run the player mode
pub async fn run_play(options: PlayOptions) -> anyhow::Result<()> {
    let content = loader::from_file(&options.content)
        .await
        .with_context(|| format!("loading '{}'", options.content.display()))?;

    let mut config = match &options.config {
        Some(path) => EngineConfig::from_file(path)
            .await
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    if options.fast {
        config = config.instant();
    }

    let store = Arc::new(JsonFileStore::new(&options.save_dir));
    let persistence = Persistence::new(store, config.saves.clone());
    let renderer = TerminalRenderer::new(&config.timing);
    let slot_count = config.saves.slot_count;
    let interpreter = Interpreter::new(Arc::new(content), persistence, config);

    println!("=== {} ===", interpreter.content().meta.title);
    println!();
    println!("Controls:");
    println!("  Enter:      next");
    println!("  1-9:        select choice");
    println!("  :save N     save to slot N (1-{})", slot_count);
    println!("  :load N     load slot N");
    println!("  :status     show relationships and alliances");
    println!("  :restart    start over");
    println!("  q:          quit");
    println!();
    print_slots(&interpreter).await;

    let mut session = Session::new(interpreter, renderer);
    session.run().await?;

    println!("Goodbye!");
    Ok(())
}

/// Validate content and print the report; `false` if it has errors
pub async fn run_check(path: &Path) -> anyhow::Result<bool> {
    let json = loader::read(path).await?;
    let checked = loader::check_str(&json)?;
    let report = &checked.report;

    println!("{}", path.display());
    println!(
        "  {} nodes, {} characters, start '{}'",
        checked.content.nodes.len(),
        checked.content.characters.npcs.len(),
        checked.content.start_node()
    );
    println!("  md5 {}", checked.digest);
    for issue in &report.issues {
        println!("  {}", issue);
    }
    println!(
        "{} error(s), {} warning(s)",
        report.error_count, report.warning_count
    );
    Ok(!report.has_errors())
}

async fn print_slots(interpreter: &Interpreter) {
    let slots = interpreter.list_slots().await;
    if slots.iter().all(|s| s.info.is_none()) {
        return;
    }
    println!("Save slots:");
    for summary in slots {
        match summary.info {
            Some(info) => println!(
                "  {}. {} - Day {}, Episode {}",
                summary.slot, info.player_name, info.day, info.episode
            ),
            None => println!("  {}. (empty)", summary.slot),
        }
    }
    println!();
}
