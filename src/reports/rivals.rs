use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::display_names;
use crate::domain::{player_key, Match};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rival {
    pub nickname: String,
    pub matches: u32,
    pub wins: u32,
    pub defeats: u32,
}

/// Most frequent 1v1 opponent, falling back to any non-walkover opponent
/// for players who never battled solo. Ties go to the alphabetically first.
pub fn find_rival(matches: &[Match], nickname: &str) -> Option<Rival> {
    let key = player_key(nickname);
    let played: Vec<&Match> = matches.iter().filter(|m| m.involves(nickname)).collect();

    let mut candidates: Vec<&Match> = played.iter().copied().filter(|m| m.is_one_on_one()).collect();
    if candidates.is_empty() {
        candidates = played.iter().copied().filter(|m| !m.is_wo).collect();
    }

    let mut counts: HashMap<String, Rival> = HashMap::new();
    let names = display_names(matches);

    for m in candidates {
        let won = m.is_winner(nickname);
        for foe in m
            .teams
            .iter()
            .filter(|team| !team.contains(nickname))
            .flat_map(|team| team.players.iter())
        {
            let foe_key = player_key(foe);
            if foe_key == key {
                continue;
            }
            let rival = counts.entry(foe_key.clone()).or_insert_with(|| Rival {
                nickname: names[&foe_key].clone(),
                matches: 0,
                wins: 0,
                defeats: 0,
            });
            rival.matches += 1;
            if won {
                rival.wins += 1;
            } else if m.is_winner(foe) {
                rival.defeats += 1;
            }
        }
    }

    counts.into_iter().min_by(|(ka, a), (kb, b)| {
        b.matches.cmp(&a.matches).then_with(|| ka.cmp(kb))
    }).map(|(_, rival)| rival)
}
