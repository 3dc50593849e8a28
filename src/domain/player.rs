use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::{player_key, MatchId, TournamentId};

/// What a player did in one round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRound {
    pub wins: u32,
    pub perfect_wins: u32,
    pub champion: bool,
    pub matches: Vec<MatchId>,
    pub matches_won: Vec<MatchId>,
}

/// Season aggregate for one competitor, rebuilt on every computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub nickname: String,
    /// 1-based rank after the last processed round, 0 before the first
    pub position: u32,
    pub score: i32,
    pub score_by_tournament: BTreeMap<TournamentId, i32>,
    pub participation: u32,
    pub titles: u32,
    pub twolala: u32,
    pub underdog_victory: u32,
    pub topdog_defeat: u32,
    pub rounds: BTreeMap<TournamentId, PlayerRound>,
}

impl Player {
    pub fn new(nickname: &str) -> Self {
        Self {
            nickname: nickname.trim().to_string(),
            position: 0,
            score: 0,
            score_by_tournament: BTreeMap::new(),
            participation: 0,
            titles: 0,
            twolala: 0,
            underdog_victory: 0,
            topdog_defeat: 0,
            rounds: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> String {
        player_key(&self.nickname)
    }

    /// Adds points to both the total and the round's share of it
    pub fn add_points(&mut self, tournament_id: &TournamentId, points: i32) {
        self.score += points;
        *self
            .score_by_tournament
            .entry(tournament_id.clone())
            .or_insert(0) += points;
    }

    pub fn tournament_score_sum(&self) -> i32 {
        self.score_by_tournament.values().sum()
    }

    pub fn round_mut(&mut self, tournament_id: &TournamentId) -> &mut PlayerRound {
        self.rounds.entry(tournament_id.clone()).or_default()
    }

    pub fn wins(&self) -> u32 {
        self.rounds.values().map(|r| r.wins).sum()
    }

    pub fn defeats(&self) -> u32 {
        self.rounds
            .values()
            .map(|r| (r.matches.len() - r.matches_won.len()) as u32)
            .sum()
    }

    pub fn perfect_wins(&self) -> u32 {
        self.rounds.values().map(|r| r.perfect_wins).sum()
    }

    pub fn tournaments_won(&self) -> u32 {
        self.rounds.values().filter(|r| r.champion).count() as u32
    }
}

/// Players keyed by normalized nickname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    players: BTreeMap<String, Player>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, nickname: &str) -> Option<&Player> {
        self.players.get(&player_key(nickname))
    }

    pub fn get_mut(&mut self, nickname: &str) -> Option<&mut Player> {
        self.players.get_mut(&player_key(nickname))
    }

    /// Score of a player, 0 if they never played
    pub fn score_of(&self, nickname: &str) -> i32 {
        self.get(nickname).map(|p| p.score).unwrap_or(0)
    }

    /// Returns the player, creating it with the given casing on first sight
    pub fn register(&mut self, nickname: &str) -> &mut Player {
        self.players
            .entry(player_key(nickname))
            .or_insert_with(|| Player::new(nickname))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
