use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{join_names, Match};

/// Battles sheet row with the derived winner and loser columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTableRow {
    pub match_id: usize,
    pub date: NaiveDate,
    pub host: String,
    pub stage: String,
    pub battle: String,
    pub winners: String,
    pub losers: String,
}

pub fn match_table(matches: &[Match]) -> Vec<MatchTableRow> {
    matches
        .iter()
        .map(|m| MatchTableRow {
            match_id: m.id,
            date: m.date,
            host: m.host.clone(),
            stage: m.stage.display_name().to_string(),
            battle: m.raw.clone(),
            winners: join_names(&m.winners),
            losers: join_names(&m.losers),
        })
        .collect()
}
