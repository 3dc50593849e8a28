use anyhow::Result;

use battle_ranking::cli::Command;
use battle_ranking::{handle_ingest, handle_parse, handle_process, handle_recap, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ingest { matches, editions } => handle_ingest(matches, editions.as_deref()),
        Command::Process => handle_process(),
        Command::Parse { raw, stage } => handle_parse(raw, stage.as_deref()),
        Command::Recap { nickname } => handle_recap(nickname),
    }
}
