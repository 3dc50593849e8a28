use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::leaderboard::{self, LeaderboardRow};
use crate::config::ScoringSettings;
use crate::domain::{player_key, Match, Round, RoundCollection, Stage, Standings, TournamentId};
use crate::errors::SeasonError;
use crate::scoring::{score_match, Clarification, MatchScore};

/// Leaderboard as it stood after one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub number: usize,
    pub tournament_id: TournamentId,
    pub date: NaiveDate,
    pub host: String,
    pub rows: Vec<LeaderboardRow>,
}

#[derive(Debug, Clone)]
pub struct SeasonResult {
    pub standings: Standings,
    pub snapshots: Vec<RoundSnapshot>,
    pub clarifications: Vec<Clarification>,
}

impl SeasonResult {
    pub fn final_leaderboard(&self) -> &[LeaderboardRow] {
        self.snapshots
            .last()
            .map(|s| s.rows.as_slice())
            .unwrap_or_default()
    }

    pub fn round_ids(&self) -> Vec<&TournamentId> {
        self.snapshots.iter().map(|s| &s.tournament_id).collect()
    }
}

/// Folds the season round by round into standings and leaderboards.
///
/// Any error aborts the whole fold; nothing partial is returned.
pub fn rank_season(matches: &[Match], settings: &ScoringSettings) -> Result<SeasonResult, SeasonError> {
    let rounds = RoundCollection::from_matches(matches);
    info!("Ranking {} battles across {} rounds", matches.len(), rounds.len());

    let mut players = Standings::new();
    let mut snapshots = Vec::with_capacity(rounds.len());
    let mut clarifications = Vec::with_capacity(matches.len());

    for (idx, round) in rounds.iter().enumerate() {
        let number = round.number.map(|n| n as usize).unwrap_or(idx + 1);
        let prev_players = players.clone();

        let participants = play_round(
            round,
            number,
            &prev_players,
            &mut players,
            settings,
            &mut clarifications,
        )?;
        apply_absence_penalty(&round.id, &participants, &prev_players, &mut players, settings);
        check_consistency(&players)?;

        let order = leaderboard::assign_positions(&mut players);
        let rows = leaderboard::build_rows(&order, &players, &prev_players);
        info!(
            "  → Round {} ({}): {} battles, {} players ranked",
            number,
            round.id,
            round.matches.len(),
            rows.len()
        );

        snapshots.push(RoundSnapshot {
            number,
            tournament_id: round.id.clone(),
            date: round.date,
            host: round.host.clone(),
            rows,
        });
    }

    Ok(SeasonResult {
        standings: players,
        snapshots,
        clarifications,
    })
}

fn play_round(
    round: &Round<'_>,
    number: usize,
    prev_players: &Standings,
    players: &mut Standings,
    settings: &ScoringSettings,
    clarifications: &mut Vec<Clarification>,
) -> Result<BTreeSet<String>, SeasonError> {
    let mut participants = BTreeSet::new();

    for m in &round.matches {
        for nickname in m.players() {
            players.register(nickname);
            participants.insert(player_key(nickname));
        }

        let score = score_match(m, number, prev_players, players, settings)?;
        apply_match(m, &round.id, &score, players);
        clarifications.push(Clarification {
            match_id: m.id,
            text: score.narrative,
        });
    }

    for key in &participants {
        if let Some(player) = players.get_mut(key) {
            player.participation += 1;
        }
    }

    Ok(participants)
}

fn apply_match(m: &Match, round_id: &TournamentId, score: &MatchScore, players: &mut Standings) {
    for nickname in m.players() {
        let player = players.register(nickname);
        player.round_mut(round_id).matches.push(m.id);

        if m.is_winner(nickname) {
            player.add_points(round_id, score.winner_delta);
            if m.is_twolala {
                player.twolala += 1;
            }
            if m.stage == Stage::Finals {
                player.titles += 1;
            }
            if score.was_underdog_upset {
                player.underdog_victory += 1;
            }

            let record = player.round_mut(round_id);
            record.wins += 1;
            record.matches_won.push(m.id);
            if m.is_twolala {
                record.perfect_wins += 1;
            }
            if m.stage == Stage::Finals {
                record.champion = true;
            }
        } else {
            player.add_points(round_id, score.loser_delta);
            if score.was_underdog_upset {
                player.topdog_defeat += 1;
            }
        }
    }
}

/// Top-ranked players who skip a round lose points
fn apply_absence_penalty(
    round_id: &TournamentId,
    participants: &BTreeSet<String>,
    prev_players: &Standings,
    players: &mut Standings,
    settings: &ScoringSettings,
) {
    let guard = 1..=settings.absence_guard_positions;

    for player in players.players_mut() {
        let previous_position = prev_players
            .get(&player.nickname)
            .map(|p| p.position)
            .unwrap_or(0);

        if guard.contains(&previous_position) && !participants.contains(&player.key()) {
            player.add_points(round_id, -settings.absence_penalty);
            debug!(
                "-{} for {}: missed round {} while in the top {} (position {})",
                settings.absence_penalty,
                player.nickname,
                round_id,
                settings.absence_guard_positions,
                previous_position
            );
        }
    }
}

fn check_consistency(players: &Standings) -> Result<(), SeasonError> {
    for player in players.players() {
        let sum = player.tournament_score_sum();
        if sum != player.score {
            return Err(SeasonError::Consistency {
                nickname: player.nickname.clone(),
                sum,
                score: player.score,
            });
        }
    }
    Ok(())
}
