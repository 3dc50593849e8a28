use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::{join_names, Edition, Match, Round, RoundCollection, Tournament, TournamentId};

/// Editions sheet row with champions and runners-up filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentRollup {
    pub date: NaiveDate,
    pub host: String,
    pub champions: String,
    pub runners_up: String,
}

pub fn build_tournaments(matches: &[Match]) -> Vec<Tournament> {
    RoundCollection::from_matches(matches)
        .iter()
        .map(|round| {
            let (champions, runners_up) = final_result(round);
            Tournament {
                id: round.id.clone(),
                date: round.date,
                host: round.host.clone(),
                round: round.number,
                champions,
                runners_up,
                matches: round.matches.iter().map(|m| m.id).collect(),
            }
        })
        .collect()
}

fn final_result(round: &Round<'_>) -> (Vec<String>, Vec<String>) {
    let finals: Vec<&Match> = round.finals().collect();
    if finals.len() > 1 {
        warn!(
            "Round {} has {} Finals battles, using the last one",
            round.id,
            finals.len()
        );
    }

    finals
        .last()
        .map(|m| (m.winners.clone(), m.losers.clone()))
        .unwrap_or_default()
}

/// One row per edition in the index, or per round when there is no index
pub fn tournament_rollups(matches: &[Match], editions: &[Edition]) -> Vec<TournamentRollup> {
    let tournaments = build_tournaments(matches);

    if editions.is_empty() {
        return tournaments.iter().map(rollup).collect();
    }

    editions
        .iter()
        .map(|edition| {
            let id = edition.id();
            match tournaments.iter().find(|t| t.id == id) {
                Some(tournament) => rollup(tournament),
                None => TournamentRollup {
                    date: edition.date,
                    host: edition.host.clone(),
                    champions: String::new(),
                    runners_up: String::new(),
                },
            }
        })
        .collect()
}

fn rollup(tournament: &Tournament) -> TournamentRollup {
    TournamentRollup {
        date: tournament.date,
        host: tournament.host.clone(),
        champions: join_names(&tournament.champions),
        runners_up: join_names(&tournament.runners_up),
    }
}

/// Editions without battles and battles without an edition, sorted
pub fn missing_round_links(matches: &[Match], editions: &[Edition]) -> Vec<String> {
    if editions.is_empty() {
        return Vec::new();
    }

    let listed: BTreeSet<TournamentId> = editions.iter().map(Edition::id).collect();
    let played: BTreeSet<TournamentId> = matches.iter().map(|m| m.tournament_id.clone()).collect();

    let mut warnings: Vec<String> = listed
        .difference(&played)
        .map(|id| format!("Edition {} has no battles", id))
        .chain(
            played
                .difference(&listed)
                .map(|id| format!("Battles of {} are not listed in the editions index", id)),
        )
        .collect();
    warnings.sort();

    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}
