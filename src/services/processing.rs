use std::path::Path;

use anyhow::{anyhow, Result};
use log::info;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database;
use crate::domain::{Edition, Match};
use crate::ranking::{rank_season, SeasonResult};
use crate::reports::{build_report, career_stats, CareerStats, SeasonReport};

/// Recomputes the whole season from the parsed cache
pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = Cache::new(&config.storage.cache_dir)?;
        Ok(Self { config, cache })
    }

    /// Writes to `<db>.tmp` and only swaps it in once everything succeeded
    pub fn run(&self) -> Result<()> {
        let db_path = &self.config.storage.database_path;
        let temp_db_path = format!("{}.tmp", db_path);

        info!("=== Starting Season Processing (Atomic) ===\n");
        info!("Target DB: {}, Temp DB: {}", db_path, temp_db_path);

        let report = self.compute_report()?;

        if Path::new(&temp_db_path).exists() {
            std::fs::remove_file(&temp_db_path)?;
        }
        self.write_to_db(&temp_db_path, &report)?;

        std::fs::rename(&temp_db_path, db_path)?;
        info!("Successfully swapped database to {}", db_path);

        info!("=== Processing Complete ===");
        Ok(())
    }

    /// Runs the season fold and every projection without touching the database
    pub fn compute_report(&self) -> Result<SeasonReport> {
        // Step 1: Load cached battles
        let matches = self.load_matches()?;
        let editions = self.load_editions()?;
        info!(
            "  → Loaded {} battles and {} editions from cache\n",
            matches.len(),
            editions.len()
        );

        // Step 2: Score and rank
        let season = self.rank(&matches)?;
        info!(
            "  → Ranked {} players over {} rounds\n",
            season.standings.len(),
            season.snapshots.len()
        );

        // Step 3: Projections
        let report = build_report(&matches, &editions, &season);
        info!("  → Built report with {} warnings\n", report.warnings.len());
        Ok(report)
    }

    /// Career recap of one player, with their place in the current season
    pub fn recap(&self, nickname: &str) -> Result<Option<CareerStats>> {
        let matches = self.load_matches()?;
        let season = self.rank(&matches)?;
        Ok(career_stats(&matches, nickname, Some(&season.standings)))
    }

    fn rank(&self, matches: &[Match]) -> Result<SeasonResult> {
        Ok(rank_season(matches, &self.config.scoring)?)
    }

    fn write_to_db(&self, db_path: &str, report: &SeasonReport) -> Result<()> {
        let pool = database::create_pool(db_path)?;
        let mut conn = database::get_connection(&pool)?;

        database::setup::reset_database(&mut conn)?;
        info!("  → Database schema reset\n");

        database::save_report(&mut conn, report)
    }

    fn load_matches(&self) -> Result<Vec<Match>> {
        self.cache
            .load_parsed("matches")?
            .ok_or_else(|| anyhow!("No battles found in cache, run ingest first"))
    }

    fn load_editions(&self) -> Result<Vec<Edition>> {
        Ok(self.cache.load_parsed("editions")?.unwrap_or_default())
    }
}
