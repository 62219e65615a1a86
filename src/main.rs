//! Health Chain - Entry Point
//!
//! Terminal driver for the health chain. Owns the session, reads commands
//! from stdin (or `--script`), and prints narration as it arrives.

use health_chain::core::config::{SessionConfig, DEFAULT_CONFIG_PATH};
use health_chain::core::error::Result;
use health_chain::narration::{NarrationEntry, NarrationKind, NarrationLog, Tee, TracingNarrator};
use health_chain::{HealthCommand, HealthError, Session};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Health Chain - chain health commands until the game ends
#[derive(Parser, Debug)]
#[command(name = "health-chain")]
#[command(about = "Apply heal and attack commands to a health value until it runs out")]
struct Args {
    /// Session config file (TOML); defaults are used if it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Starting health, overrides the config file
    #[arg(long, allow_negative_numbers = true)]
    health: Option<i64>,

    /// Comma-separated commands to chain without prompting, e.g. "Heal,Major_Attack"
    #[arg(long)]
    script: Option<String>,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level for the health_chain target (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON output structure
#[derive(Serialize)]
struct FinalReport<'a> {
    health: i64,
    terminated: bool,
    commands_applied: u32,
    narration: Vec<&'a NarrationEntry>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("health_chain={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Load config, letting --health override the starting value
    let mut config = SessionConfig::load_or_default(&args.config)?;
    if let Some(health) = args.health {
        config = config.with_starting_health(health)?;
    }
    tracing::info!(?config, "Health Chain starting...");

    // Create the session and its narration log
    let mut session = Session::from_config(&config);
    let mut log = NarrationLog::with_capacity(config.narration_capacity);

    match &args.script {
        Some(script) => run_script(&mut session, &mut log, script)?,
        None => run_interactive(&mut session, &mut log, &config)?,
    }

    print_final_report(&session, &log, args.format)
}

/// Chain every scripted command through a single outcome
fn run_script(session: &mut Session, log: &mut NarrationLog, script: &str) -> Result<()> {
    let names: Vec<&str> = script
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    let mark = log.next_sequence();
    let report = session.run_sequence(&names, Tee(&mut *log, TracingNarrator))?;
    tracing::info!(
        executed = report.executed.len(),
        skipped = report.skipped.len(),
        "script finished"
    );
    print_narration(log, mark);
    Ok(())
}

fn run_interactive(
    session: &mut Session,
    log: &mut NarrationLog,
    config: &SessionConfig,
) -> Result<()> {
    println!("\n=== HEALTH CHAIN ===");
    println!("Every command is a step; the chain stops when health runs out.");
    println!();
    print_help();

    // Main game loop
    loop {
        // Display current status
        display_status(session);

        // Prompt for input
        print!("> ");
        io::stdout().flush()?;

        // Read input; EOF ends the game
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        // Handle empty input
        if input.is_empty() {
            continue;
        }

        // Handle driver commands before health commands
        match input.to_lowercase().as_str() {
            "quit" | "q" => break,
            "help" | "h" => {
                print_help();
                continue;
            }
            "log" => {
                print_narration(log, 0);
                continue;
            }
            "restart" | "r" => {
                let mark = log.next_sequence();
                session.restart(config, Tee(&mut *log, TracingNarrator));
                print_narration(log, mark);
                continue;
            }
            _ => {}
        }

        // Everything else is a health command
        let mark = log.next_sequence();
        match session.apply_named(input, Tee(&mut *log, TracingNarrator)) {
            Ok(_) => print_narration(log, mark),
            Err(HealthError::UnknownCommand(name)) => {
                println!("Unknown command '{}'. Type 'help' for the list.", name);
            }
            Err(HealthError::SessionTerminated) => {
                println!("Game over. Type 'restart' to play again or 'quit' to exit.");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    for command in HealthCommand::all() {
        println!("  {:<16} - {:+} health", command.name(), command.delta());
    }
    println!("  restart / r      - Start a new game");
    println!("  log              - Show the narration log");
    println!("  help / h         - Show this list");
    println!("  quit / q         - Exit");
    println!();
}

fn display_status(session: &Session) {
    if session.is_terminated() {
        println!("[health: {} | GAME OVER]", session.health());
    } else {
        let available: Vec<_> = session
            .available_commands()
            .iter()
            .map(|c| c.name())
            .collect();
        println!(
            "[health: {} | available: {}]",
            session.health(),
            available.join(", ")
        );
    }
}

fn print_narration(log: &NarrationLog, mark: u64) {
    for entry in log.since(mark) {
        let tag = match entry.kind {
            NarrationKind::Info => "info",
            NarrationKind::Success => " ok ",
            NarrationKind::Failure => "FAIL",
        };
        println!("  [{}] {}", tag, entry.text);
    }
}

fn print_final_report(session: &Session, log: &NarrationLog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = FinalReport {
                health: session.health(),
                terminated: session.is_terminated(),
                commands_applied: session.commands_applied(),
                narration: log.entries().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "\nFinal state: health {}, {} command(s) applied{}.",
                session.health(),
                session.commands_applied(),
                if session.is_terminated() { ", game over" } else { "" }
            );
        }
    }
    Ok(())
}
