use super::models::{Mode, Team};

pub fn max_rounds_won(teams: &[Team]) -> u32 {
    teams.iter().map(|t| t.rounds_won).max().unwrap_or(0)
}

/// Players of every team tied on the highest `rounds_won`.
///
/// Empty when a non-walkover battle ends with every team tied. A walkover
/// without a recorded opponent has a single team, which is returned as the
/// winner.
pub fn get_winners(teams: &[Team], is_wo: bool) -> Vec<String> {
    if is_draw(teams, is_wo) {
        return Vec::new();
    }

    let max = max_rounds_won(teams);
    teams
        .iter()
        .filter(|t| t.rounds_won == max)
        .flat_map(|t| t.players.iter().cloned())
        .collect()
}

pub fn get_losers(teams: &[Team]) -> Vec<String> {
    let max = max_rounds_won(teams);
    teams
        .iter()
        .filter(|t| t.rounds_won < max)
        .flat_map(|t| t.players.iter().cloned())
        .collect()
}

pub fn get_mode(teams: &[Team]) -> Mode {
    if teams.len() == 3 && teams.iter().all(|t| t.players.len() == 1) {
        return Mode::DoubleThree;
    }

    match teams.iter().map(|t| t.players.len()).max().unwrap_or(1) {
        1 => Mode::Solo,
        2 => Mode::Duo,
        3 => Mode::Trio,
        _ => Mode::Quartet,
    }
}

/// Perfect 2-0 finish between two teams
pub fn is_twolala(teams: &[Team], is_wo: bool) -> bool {
    !is_wo && teams.len() == 2 && teams.iter().map(|t| t.rounds_won).sum::<u32>() == 2
}

/// No team has more rounds than all the others.
///
/// A double-three where two players share the top is not a draw; only a
/// full tie is.
pub fn is_draw(teams: &[Team], is_wo: bool) -> bool {
    if is_wo || teams.len() < 2 {
        return false;
    }
    let max = max_rounds_won(teams);
    teams.iter().all(|t| t.rounds_won == max)
}
