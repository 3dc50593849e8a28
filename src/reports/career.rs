use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::positions::{position_histogram, PositionHistogram};
use super::rivals::{find_rival, Rival};
use super::display_names;
use crate::domain::{player_key, Match, Stage, Standings};

/// Where the player stands in the computed season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonLine {
    pub position: u32,
    pub score: i32,
    pub wins: u32,
    pub defeats: u32,
    pub perfect_wins: u32,
    pub rounds_won: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStats {
    pub nickname: String,
    pub editions: u32,
    pub battles: u32,
    pub titles: u32,
    pub runner_up: u32,
    pub finals: u32,
    pub wins: u32,
    pub defeats: u32,
    pub win_rate: f64,
    pub titles_per_edition: f64,
    pub solo_titles: u32,
    pub solo_wins: u32,
    pub twolala: u32,
    pub distinct_foes: u32,
    pub favorite_host: Option<String>,
    pub favorite_host_editions: u32,
    pub rival: Option<Rival>,
    pub positions: PositionHistogram,
    pub season: Option<SeasonLine>,
}

/// Career numbers of one player, `None` if they never battled
pub fn career_stats(matches: &[Match], nickname: &str, standings: Option<&Standings>) -> Option<CareerStats> {
    let played: Vec<&Match> = matches.iter().filter(|m| m.involves(nickname)).collect();
    if played.is_empty() {
        return None;
    }

    let names = display_names(matches);
    let won: Vec<&Match> = played.iter().copied().filter(|m| m.is_winner(nickname)).collect();
    let finals = played.iter().filter(|m| m.stage == Stage::Finals).count() as u32;
    let titles = won.iter().filter(|m| m.stage == Stage::Finals).count() as u32;
    let sole_wins: Vec<&&Match> = won.iter().filter(|m| m.winners.len() == 1).collect();

    let editions: BTreeSet<_> = played.iter().map(|m| &m.tournament_id).collect();
    let battles = played.len() as u32;
    let wins = won.len() as u32;
    let defeats = played.iter().filter(|m| m.is_loser(nickname)).count() as u32;
    let (favorite_host, favorite_host_editions) = favorite_host(&played);

    Some(CareerStats {
        nickname: names
            .get(&player_key(nickname))
            .cloned()
            .unwrap_or_else(|| nickname.to_string()),
        editions: editions.len() as u32,
        battles,
        titles,
        runner_up: finals - titles,
        finals,
        wins,
        defeats,
        win_rate: ratio(wins, battles),
        titles_per_edition: ratio(titles, editions.len() as u32),
        solo_titles: sole_wins.iter().filter(|m| m.stage == Stage::Finals).count() as u32,
        solo_wins: sole_wins.len() as u32,
        twolala: won.iter().filter(|m| m.is_twolala).count() as u32,
        distinct_foes: distinct_foes(&played, nickname),
        favorite_host,
        favorite_host_editions,
        rival: find_rival(matches, nickname),
        positions: position_histogram(matches, nickname),
        season: standings.and_then(|s| season_line(s, nickname)),
    })
}

/// Every player's career, most decorated first
pub fn career_table(matches: &[Match], standings: Option<&Standings>) -> Vec<CareerStats> {
    let names = display_names(matches);
    let mut table: Vec<CareerStats> = names
        .values()
        .filter_map(|nickname| career_stats(matches, nickname, standings))
        .collect();

    table.sort_by(|a, b| {
        b.titles
            .cmp(&a.titles)
            .then_with(|| b.solo_titles.cmp(&a.solo_titles))
            .then_with(|| b.runner_up.cmp(&a.runner_up))
            .then_with(|| a.nickname.cmp(&b.nickname))
    });
    table
}

fn season_line(standings: &Standings, nickname: &str) -> Option<SeasonLine> {
    standings.get(nickname).map(|player| SeasonLine {
        position: player.position,
        score: player.score,
        wins: player.wins(),
        defeats: player.defeats(),
        perfect_wins: player.perfect_wins(),
        rounds_won: player.tournaments_won(),
    })
}

fn ratio(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn distinct_foes(played: &[&Match], nickname: &str) -> u32 {
    played
        .iter()
        .flat_map(|m| m.teams.iter())
        .filter(|team| !team.contains(nickname))
        .flat_map(|team| team.players.iter())
        .map(|foe| player_key(foe))
        .collect::<BTreeSet<_>>()
        .len() as u32
}

/// Host of most editions played; ties go to the alphabetically first
fn favorite_host(played: &[&Match]) -> (Option<String>, u32) {
    let mut seen = BTreeSet::new();
    let mut counts: HashMap<String, (String, u32)> = HashMap::new();

    for m in played {
        if !seen.insert(&m.tournament_id) {
            continue;
        }
        counts
            .entry(player_key(&m.host))
            .or_insert_with(|| (m.host.clone(), 0))
            .1 += 1;
    }

    counts
        .into_values()
        .min_by(|(ha, a), (hb, b)| b.cmp(a).then_with(|| ha.cmp(hb)))
        .map(|(host, count)| (Some(host), count))
        .unwrap_or((None, 0))
}
