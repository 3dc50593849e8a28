mod career;
mod head_to_head;
mod history;
mod hosts;
mod judges;
mod positions;
mod rivals;
pub mod tables;
mod tournaments;

use std::collections::HashMap;

use serde::Serialize;

pub use career::{career_stats, career_table, CareerStats, SeasonLine};
pub use head_to_head::{head_to_head, HeadToHead};
pub use history::{season_history, HistoryRow};
pub use hosts::{host_editions, HostEditions};
pub use judges::{judge_participation, JudgeParticipation};
pub use positions::{classify, position_histogram, PositionHistogram, TournamentPosition};
pub use rivals::{find_rival, Rival};
pub use tables::{match_table, MatchTableRow};
pub use tournaments::{build_tournaments, missing_round_links, tournament_rollups, TournamentRollup};

use crate::domain::{player_key, Edition, Match};
use crate::ranking::{RoundSnapshot, SeasonResult};
use crate::scoring::Clarification;

/// Everything the output collaborators render after a season run
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub matches: Vec<MatchTableRow>,
    pub leaderboards: Vec<RoundSnapshot>,
    pub clarifications: Vec<Clarification>,
    pub tournaments: Vec<TournamentRollup>,
    pub history: Vec<HistoryRow>,
    pub head_to_head: Vec<HeadToHead>,
    pub hosts: Vec<HostEditions>,
    pub judges: Vec<JudgeParticipation>,
    pub careers: Vec<CareerStats>,
    pub warnings: Vec<String>,
}

pub fn build_report(matches: &[Match], editions: &[Edition], season: &SeasonResult) -> SeasonReport {
    SeasonReport {
        matches: match_table(matches),
        leaderboards: season.snapshots.clone(),
        clarifications: season.clarifications.clone(),
        tournaments: tournament_rollups(matches, editions),
        history: season_history(season),
        head_to_head: head_to_head(matches),
        hosts: host_editions(matches),
        judges: judge_participation(matches),
        careers: career_table(matches, Some(&season.standings)),
        warnings: missing_round_links(matches, editions),
    }
}

/// First-seen spelling of every player, by matching key
fn display_names(matches: &[Match]) -> HashMap<String, String> {
    let mut names = HashMap::new();
    for nickname in matches.iter().flat_map(|m| m.players()) {
        names
            .entry(player_key(nickname))
            .or_insert_with(|| nickname.clone());
    }
    names
}
