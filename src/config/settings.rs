#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub eight_finals_points: i32,
    pub later_stage_points: i32,
    pub twolala_bonus: i32,
    pub underdog_steal: i32,
    pub absence_penalty: i32,
    pub absence_guard_positions: u32,
    pub split_duo_points: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            eight_finals_points: 1,
            later_stage_points: 2,
            twolala_bonus: 1,
            underdog_steal: 1,
            absence_penalty: 1,
            absence_guard_positions: 4, // top 4 must show up or lose a point
            split_duo_points: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub cache_dir: String,
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            cache_dir: "cache".to_string(),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "battle_ranking.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scoring: ScoringSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}
