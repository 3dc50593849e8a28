use anyhow::{Context, Result};
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON file cache between ingestion and processing.
///
/// `raw/` keeps the sheet rows exactly as read, `parsed/` keeps the
/// validated battles and editions the season run starts from.
pub struct Cache {
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self {
            raw_dir,
            parsed_dir,
        })
    }

    pub fn save_raw<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = entry_path(&self.raw_dir, key);
        write_json(&file_path, data)?;
        info!("Saved raw data to cache: {}", file_path.display());
        Ok(())
    }

    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = entry_path(&self.parsed_dir, key);
        write_json(&file_path, data)?;
        info!("Saved parsed data to cache: {}", file_path.display());
        Ok(())
    }

    pub fn load_parsed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        read_json_opt(&entry_path(&self.parsed_dir, key))
    }
}

fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize cache entry")?;
    fs::write(path, json).with_context(|| format!("Failed to write cache file {}", path.display()))
}

fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cache file {}", path.display()))?;
    let data = serde_json::from_str(&json).with_context(|| {
        format!(
            "Failed to parse JSON from {:?}. First 200 chars: {}",
            path,
            json.chars().take(200).collect::<String>()
        )
    })?;
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("battle-ranking-cache-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn tiers_are_kept_apart() {
        let dir = scratch_dir("tiers");
        let cache = Cache::new(&dir).unwrap();

        cache.save_raw("matches", &vec!["RK 2 x 1 Big Xang"]).unwrap();
        assert!(cache.load_parsed::<Vec<String>>("matches").unwrap().is_none());

        let raw = fs::read_to_string(dir.join("raw").join("matches.json")).unwrap();
        let raw: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(raw, vec!["RK 2 x 1 Big Xang"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn corrupt_entries_are_reported() {
        let dir = scratch_dir("corrupt");
        let cache = Cache::new(&dir).unwrap();
        fs::write(dir.join("parsed").join("matches.json"), "{not json").unwrap();

        let err = cache.load_parsed::<Vec<String>>("matches").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse JSON"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
