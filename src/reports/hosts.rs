use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{player_key, Match, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEditions {
    pub host: String,
    pub editions: u32,
}

/// Editions per organizer, counted through their Finals battles
pub fn host_editions(matches: &[Match]) -> Vec<HostEditions> {
    let mut counts: HashMap<String, HostEditions> = HashMap::new();

    for m in matches.iter().filter(|m| m.stage == Stage::Finals) {
        counts
            .entry(player_key(&m.host))
            .or_insert_with(|| HostEditions {
                host: m.host.clone(),
                editions: 0,
            })
            .editions += 1;
    }

    let mut table: Vec<HostEditions> = counts.into_values().collect();
    table.sort_by(|a, b| b.editions.cmp(&a.editions).then_with(|| a.host.cmp(&b.host)));
    table
}
