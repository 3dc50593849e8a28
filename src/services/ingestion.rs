use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::domain::{Edition, Match};
use crate::parsing::{editions_from_rows, read_edition_rows, read_match_rows, MatchAssembler};

/// Reads the battle sheets and fills the cache the season run starts from
pub struct IngestionService {
    cache: Cache,
    assembler: MatchAssembler,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.storage.cache_dir)?,
            assembler: MatchAssembler::new()?,
        })
    }

    pub fn run(&self, matches_path: &Path, editions_path: Option<&Path>) -> Result<()> {
        info!("=== Starting Data Ingestion ===\n");

        // Step 1: Battles sheet
        let matches = self.ingest_matches(matches_path)?;
        info!("  → Parsed {} battles\n", matches.len());

        // Step 2: Editions index, optional
        let editions = match editions_path {
            Some(path) => self.ingest_editions(path)?,
            None => Vec::new(),
        };
        info!("  → Parsed {} editions\n", editions.len());

        // Step 3: Save to parsed cache
        self.cache.save_parsed("matches", &matches)?;
        self.cache.save_parsed("editions", &editions)?;
        info!("  → Saved to parsed cache\n");

        info!("=== Ingestion Complete ===");
        Ok(())
    }

    fn ingest_matches(&self, path: &Path) -> Result<Vec<Match>> {
        info!("Step 1: Reading battles from {}...", path.display());

        let rows = read_match_rows(path)?;
        self.cache.save_raw("matches", &rows)?;

        self.assembler
            .assemble(&rows)
            .with_context(|| format!("Invalid battle in {}", path.display()))
    }

    fn ingest_editions(&self, path: &Path) -> Result<Vec<Edition>> {
        info!("Step 2: Reading editions from {}...", path.display());

        let rows = read_edition_rows(path)?;
        self.cache.save_raw("editions", &rows)?;

        editions_from_rows(&rows).with_context(|| format!("Invalid edition in {}", path.display()))
    }
}
