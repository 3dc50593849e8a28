use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Player, Standings};

/// One line of a round's leaderboard, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub position: u32,
    pub nickname: String,
    pub position_delta: String,
    pub score_delta: String,
    pub score: i32,
    /// `None` renders as a blank cell
    pub twolala: Option<u32>,
    pub participation: u32,
    pub titles: String,
}

/// Score desc, titles desc, twolalas desc, then fewer rounds played first
pub fn compare_players(a: &Player, b: &Player) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.titles.cmp(&a.titles))
        .then_with(|| b.twolala.cmp(&a.twolala))
        .then_with(|| a.participation.cmp(&b.participation))
}

/// Sorts the players and stores their competition-ranking position
/// (1, 1, 1, 4, ...). Returns player keys in display order.
pub fn assign_positions(standings: &mut Standings) -> Vec<String> {
    let mut ordered: Vec<&Player> = standings.players().collect();
    ordered.sort_by(|a, b| compare_players(a, b).then_with(|| a.key().cmp(&b.key())));

    let mut ranked: Vec<(String, u32)> = Vec::with_capacity(ordered.len());
    let mut position = 0;
    for (idx, player) in ordered.iter().enumerate() {
        let starts_new_rank = idx == 0 || compare_players(ordered[idx - 1], player) != Ordering::Equal;
        if starts_new_rank {
            position = idx as u32 + 1;
        }
        ranked.push((player.key(), position));
    }

    for (key, position) in &ranked {
        if let Some(player) = standings.get_mut(key) {
            player.position = *position;
        }
    }

    ranked.into_iter().map(|(key, _)| key).collect()
}

pub fn build_rows(order: &[String], current: &Standings, previous: &Standings) -> Vec<LeaderboardRow> {
    order
        .iter()
        .filter_map(|key| current.get(key))
        .map(|player| {
            let before = previous.get(&player.nickname);
            let previous_score = before.map(|p| p.score).unwrap_or(0);
            let previous_position = before.map(|p| p.position).unwrap_or(0);

            LeaderboardRow {
                position: player.position,
                nickname: player.nickname.clone(),
                position_delta: format_position_delta(previous_position, player.position, player.score),
                score_delta: format_score_delta(player.score - previous_score),
                score: player.score,
                twolala: Some(player.twolala).filter(|&n| n > 0),
                participation: player.participation,
                titles: format_titles(player.titles),
            }
        })
        .collect()
}

/// "+2", "-1", or blank when unchanged
pub fn format_score_delta(delta: i32) -> String {
    match delta.cmp(&0) {
        Ordering::Greater => format!("+{}", delta),
        Ordering::Less => delta.to_string(),
        Ordering::Equal => String::new(),
    }
}

/// `previous == 0` marks a newcomer: "▲" if they scored, blank otherwise
pub fn format_position_delta(previous: u32, current: u32, score: i32) -> String {
    if previous == 0 {
        return if score != 0 { "▲".to_string() } else { String::new() };
    }

    match current.cmp(&previous) {
        Ordering::Less => format!("▲ {}", previous - current),
        Ordering::Greater => format!("▼ {}", current - previous),
        Ordering::Equal => String::new(),
    }
}

pub fn format_titles(titles: u32) -> String {
    "🏆".repeat(titles as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings(players: &[(&str, i32, u32, u32, u32)]) -> Standings {
        let mut standings = Standings::new();
        for (nickname, score, titles, twolala, participation) in players {
            let player = standings.register(nickname);
            player.score = *score;
            player.titles = *titles;
            player.twolala = *twolala;
            player.participation = *participation;
        }
        standings
    }

    fn positions(standings: &mut Standings) -> Vec<(String, u32)> {
        let order = assign_positions(standings);
        order
            .iter()
            .map(|key| {
                let p = standings.get(key).unwrap();
                (p.nickname.clone(), p.position)
            })
            .collect()
    }

    #[test]
    fn ties_share_position_with_gaps() {
        let mut table = standings(&[
            ("A", 3, 0, 0, 1),
            ("B", 3, 0, 0, 1),
            ("C", 3, 0, 0, 1),
            ("D", 1, 0, 0, 1),
        ]);
        let ranked: Vec<u32> = positions(&mut table).into_iter().map(|(_, p)| p).collect();
        assert_eq!(ranked, vec![1, 1, 1, 4]);
    }

    #[test]
    fn tiebreaks_apply_in_order() {
        let mut table = standings(&[
            ("Frequent", 4, 1, 1, 3),
            ("Efficient", 4, 1, 1, 2),
            ("Perfect", 4, 1, 2, 5),
            ("Champion", 4, 2, 0, 5),
            ("Leader", 5, 0, 0, 5),
        ]);
        let names: Vec<String> = positions(&mut table).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Leader", "Champion", "Perfect", "Efficient", "Frequent"]);
    }

    #[test]
    fn score_delta_display() {
        assert_eq!(format_score_delta(2), "+2");
        assert_eq!(format_score_delta(-1), "-1");
        assert_eq!(format_score_delta(0), "");
    }

    #[test]
    fn position_delta_display() {
        assert_eq!(format_position_delta(0, 3, 0), "");
        assert_eq!(format_position_delta(0, 3, 2), "▲");
        assert_eq!(format_position_delta(5, 2, 4), "▲ 3");
        assert_eq!(format_position_delta(2, 4, 4), "▼ 2");
        assert_eq!(format_position_delta(2, 2, 4), "");
    }

    #[test]
    fn rows_compare_against_previous_round() {
        let previous = {
            let mut table = standings(&[("A", 2, 0, 0, 1), ("B", 3, 0, 1, 1)]);
            assign_positions(&mut table);
            table
        };
        let mut current = standings(&[("A", 5, 1, 0, 2), ("B", 3, 0, 1, 1), ("C", 0, 0, 0, 1)]);
        let order = assign_positions(&mut current);
        let rows = build_rows(&order, &current, &previous);

        assert_eq!(rows[0].nickname, "A");
        assert_eq!(rows[0].position_delta, "▲ 1");
        assert_eq!(rows[0].score_delta, "+3");
        assert_eq!(rows[0].titles, "🏆");
        assert_eq!(rows[0].twolala, None);
        assert_eq!(rows[1].position_delta, "▼ 1");
        assert_eq!(rows[1].twolala, Some(1));
        assert_eq!(rows[2].position_delta, "");
        assert_eq!(rows[2].score_delta, "");
    }
}
