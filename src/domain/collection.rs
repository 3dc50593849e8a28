use chrono::NaiveDate;

use super::models::{Match, Stage, TournamentId};

/// Battles of one round, in input order
#[derive(Debug, Clone)]
pub struct Round<'a> {
    pub id: TournamentId,
    pub date: NaiveDate,
    pub host: String,
    pub number: Option<u32>,
    pub matches: Vec<&'a Match>,
}

impl Round<'_> {
    /// The Finals battles of this round; normally exactly one
    pub fn finals(&self) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .copied()
            .filter(|m| m.stage == Stage::Finals)
    }
}

/// Season battles grouped by round, ordered by date, then explicit round
/// number, then round id
pub struct RoundCollection<'a> {
    rounds: Vec<Round<'a>>,
}

impl<'a> RoundCollection<'a> {
    pub fn from_matches(matches: &'a [Match]) -> Self {
        let mut rounds: Vec<Round<'a>> = Vec::new();

        for m in matches {
            match rounds.iter_mut().find(|r| r.id == m.tournament_id) {
                Some(round) => round.matches.push(m),
                None => rounds.push(Round {
                    id: m.tournament_id.clone(),
                    date: m.date,
                    host: m.host.clone(),
                    number: m.round,
                    matches: vec![m],
                }),
            }
        }

        rounds.sort_by(|a, b| {
            (a.date, a.number.unwrap_or(0), &a.id).cmp(&(b.date, b.number.unwrap_or(0), &b.id))
        });
        Self { rounds }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn get(&self, id: &TournamentId) -> Option<&Round<'a>> {
        self.rounds.iter().find(|r| &r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Round<'a>> {
        self.rounds.iter()
    }
}
