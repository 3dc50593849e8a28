use serde::{Deserialize, Serialize};

use crate::ranking::leaderboard::format_score_delta;
use crate::ranking::SeasonResult;

/// Season history line: what each round added to a player's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub position: u32,
    pub nickname: String,
    pub score: i32,
    pub round_deltas: Vec<String>,
    pub underdog_victories: Option<u32>,
    pub topdog_defeats: Option<u32>,
}

pub fn season_history(season: &SeasonResult) -> Vec<HistoryRow> {
    let round_ids = season.round_ids();

    season
        .final_leaderboard()
        .iter()
        .filter_map(|row| season.standings.get(&row.nickname))
        .map(|player| HistoryRow {
            position: player.position,
            nickname: player.nickname.clone(),
            score: player.score,
            round_deltas: round_ids
                .iter()
                .map(|id| format_score_delta(player.score_by_tournament.get(*id).copied().unwrap_or(0)))
                .collect(),
            underdog_victories: Some(player.underdog_victory).filter(|&n| n > 0),
            topdog_defeats: Some(player.topdog_defeat).filter(|&n| n > 0),
        })
        .collect()
}
