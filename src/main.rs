//! CLI entry point for gauntlet
//!
//! Plays a story in the terminal or validates a content file.

use gauntlet::cli::{PlayOptions, run_check, run_play};
use gauntlet::config::DEBUG_ENV;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            let options = match parse_play_args(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("Error: {}", message);
                    eprintln!();
                    print_usage();
                    process::exit(1);
                }
            };
            if let Err(err) = run_play(options).await {
                eprintln!("Error: Player mode failed");
                eprintln!("Reason: {:#}", err);
                process::exit(1);
            }
        }
        "check" => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: Missing content file path");
                eprintln!();
                print_usage();
                process::exit(1);
            };
            match run_check(&PathBuf::from(path)).await {
                Ok(true) => {}
                Ok(false) => process::exit(1),
                Err(err) => {
                    eprintln!("Error: Check failed");
                    eprintln!("Reason: {:#}", err);
                    process::exit(1);
                }
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_play_args(args: &[String]) -> Result<PlayOptions, String> {
    let mut iter = args.iter();
    let content = iter.next().ok_or("Missing content file path")?;
    let mut options = PlayOptions::new(content);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--save-dir" => {
                let dir = iter.next().ok_or("--save-dir needs a directory")?;
                options.save_dir = PathBuf::from(dir);
            }
            "--config" => {
                let file = iter.next().ok_or("--config needs a file")?;
                options.config = Some(PathBuf::from(file));
            }
            "--fast" => options.fast = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }
    Ok(options)
}

fn print_usage() {
    println!("gauntlet - Challenge 2 Survive story player");
    println!();
    println!("USAGE:");
    println!("    gauntlet play <content.json> [--save-dir DIR] [--config FILE] [--fast]");
    println!("    gauntlet check <content.json>");
    println!();
    println!("COMMANDS:");
    println!("    play <file>     Play the story in the terminal");
    println!("    check <file>    Validate content and print its digest");
    println!("    --help, -h      Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --save-dir DIR  Where saves are written (default: ./saves)");
    println!("    --config FILE   JSON engine config");
    println!("    --fast          No delays or typewriter effect");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}=1  Debug logging to stderr", DEBUG_ENV);
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    if std::env::var_os(DEBUG_ENV).is_none() {
        return;
    }
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
