//! Cast Ability - Entry Point
//!
//! Replays conversation turns: reads one JSON request per line, answers
//! each through the configured ability and writes one JSON response per
//! line. Slot-filling state is kept in memory between turns.

use cast_ability::conversation::MemoryContextStore;
use cast_ability::core::error::Result;
use cast_ability::{Ability, AbilityConfig, Request};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cast Ability - route voice requests to cast devices
#[derive(Parser, Debug)]
#[command(name = "cast-ability")]
#[command(about = "Answer NLU requests for cast devices, one JSON request per line")]
struct Args {
    /// Ability configuration (TOML); defaults to $CAST_ABILITY_CONFIG or built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// File of JSON requests; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Conversation id for requests that carry none
    #[arg(long)]
    conversation: Option<String>,

    /// Pretty-print responses
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs on stderr, stdout is reserved for responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cast_ability=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AbilityConfig::load(path)?,
        None => AbilityConfig::from_env()?,
    };
    let ability = Ability::from_config(&config)?;

    let conversation = args
        .conversation
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    tracing::info!("{} answering conversation {}", ability.name(), conversation);

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut store = MemoryContextStore::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line_no + 1, e);
                continue;
            }
        };

        let conversation_id = request
            .conversation_id
            .clone()
            .unwrap_or_else(|| conversation.clone());
        let response = ability.handle_turn(&mut store, &conversation_id, request);
        tracing::info!("[{}] {}", conversation_id, response.spoken());

        let json = if args.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        writeln!(out, "{}", json)?;
    }

    Ok(())
}
