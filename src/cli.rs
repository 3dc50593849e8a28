use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "rap battle season ranking")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Read the battle sheets, validate them and store them in cache
    Ingest {
        /// Battles CSV (date, host, stage, battle, round, judges)
        #[arg(short, long)]
        matches: PathBuf,
        /// Editions index CSV (date, host)
        #[arg(short, long)]
        editions: Option<PathBuf>,
    },
    /// Recompute the season from cache and write it to the database
    Process,
    /// Parse a single battle result and print it as JSON
    Parse {
        /// Result text, e.g. "RK 2 x 1 Big Xang"
        raw: String,
        /// Stage label, e.g. "Oitavas de final"
        #[arg(short, long)]
        stage: Option<String>,
    },
    /// Print the career recap of one player as JSON
    Recap {
        nickname: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_takes_optional_editions() {
        let cli = Cli::try_parse_from(["battle_ranking", "ingest", "--matches", "season.csv"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Ingest {
                matches: PathBuf::from("season.csv"),
                editions: None,
            }
        );
    }

    #[test]
    fn parse_accepts_a_stage() {
        let cli =
            Cli::try_parse_from(["battle_ranking", "parse", "A 2 x 0 B", "--stage", "Final"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Parse {
                raw: "A 2 x 0 B".to_string(),
                stage: Some("Final".to_string()),
            }
        );
    }
}
