use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{player_key, Match};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeParticipation {
    pub nickname: String,
    pub participations: u32,
}

/// Battles judged per person; rows without judges are ignored
pub fn judge_participation(matches: &[Match]) -> Vec<JudgeParticipation> {
    let mut judges: HashMap<String, JudgeParticipation> = HashMap::new();

    for nickname in matches.iter().flat_map(|m| m.judges.iter()) {
        judges
            .entry(player_key(nickname))
            .or_insert_with(|| JudgeParticipation {
                nickname: nickname.clone(),
                participations: 0,
            })
            .participations += 1;
    }

    let mut table: Vec<JudgeParticipation> = judges.into_values().collect();
    table.sort_by(|a, b| {
        b.participations
            .cmp(&a.participations)
            .then_with(|| a.nickname.cmp(&b.nickname))
    });
    table
}
