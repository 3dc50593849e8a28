pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod parsing;
pub mod ranking;
pub mod reports;
pub mod scoring;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::parsing::{MatchAssembler, MatchRow};
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_ingest(matches: &Path, editions: Option<&Path>) -> Result<()> {
    let config = AppConfig::new();
    let service = IngestionService::new(&config)?;
    service.run(matches, editions)
}

pub fn handle_process() -> Result<()> {
    let config = AppConfig::new();
    let service = ProcessingService::new(config)?;
    service.run()
}

/// Parses one result as if it were played today
pub fn handle_parse(raw: &str, stage: Option<&str>) -> Result<()> {
    let row = MatchRow {
        date: Local::now().date_naive().to_string(),
        host: "avulsa".to_string(),
        stage: stage.unwrap_or_default().to_string(),
        battle: raw.to_string(),
        ..Default::default()
    };

    let mut matches = MatchAssembler::new()?.assemble(&[row])?;
    let parsed = matches.pop().context("Nothing to parse")?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

pub fn handle_recap(nickname: &str) -> Result<()> {
    let config = AppConfig::new();
    let service = ProcessingService::new(config)?;
    let career = service
        .recap(nickname)?
        .with_context(|| format!("{} has no recorded battles", nickname))?;
    println!("{}", serde_json::to_string_pretty(&career)?);
    Ok(())
}
