pub mod settings;
pub mod stages;

pub use settings::{AppConfig, ScoringSettings, StorageSettings};
pub use stages::{display_name, get_stage_labels, stage_for_label};
