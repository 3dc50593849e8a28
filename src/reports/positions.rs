use serde::{Deserialize, Serialize};

use crate::domain::{Match, Round, RoundCollection, Stage};

/// How far a player went in one edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TournamentPosition {
    FirstStage,
    SecondStage,
    SemiFinals,
    RunnerUp,
    Champion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHistogram {
    pub first_stage: u32,
    pub second_stage: u32,
    pub semi_finals: u32,
    pub runner_up: u32,
    pub champion: u32,
}

impl PositionHistogram {
    pub fn add(&mut self, position: TournamentPosition) {
        *self.slot(position) += 1;
    }

    pub fn get(&self, position: TournamentPosition) -> u32 {
        match position {
            TournamentPosition::FirstStage => self.first_stage,
            TournamentPosition::SecondStage => self.second_stage,
            TournamentPosition::SemiFinals => self.semi_finals,
            TournamentPosition::RunnerUp => self.runner_up,
            TournamentPosition::Champion => self.champion,
        }
    }

    fn slot(&mut self, position: TournamentPosition) -> &mut u32 {
        match position {
            TournamentPosition::FirstStage => &mut self.first_stage,
            TournamentPosition::SecondStage => &mut self.second_stage,
            TournamentPosition::SemiFinals => &mut self.semi_finals,
            TournamentPosition::RunnerUp => &mut self.runner_up,
            TournamentPosition::Champion => &mut self.champion,
        }
    }
}

/// `None` when the player did not battle in this round
pub fn classify(round: &Round<'_>, nickname: &str) -> Option<TournamentPosition> {
    let furthest = round
        .matches
        .iter()
        .filter(|m| m.involves(nickname))
        .map(|m| m.stage)
        .max()?;

    if round.finals().any(|m| m.is_winner(nickname)) {
        return Some(TournamentPosition::Champion);
    }

    Some(match furthest {
        Stage::Finals => TournamentPosition::RunnerUp,
        Stage::SemiFinals => TournamentPosition::SemiFinals,
        Stage::QuarterFinals => TournamentPosition::SecondStage,
        Stage::EightFinals | Stage::Unknown => TournamentPosition::FirstStage,
    })
}

pub fn position_histogram(matches: &[Match], nickname: &str) -> PositionHistogram {
    let rounds = RoundCollection::from_matches(matches);
    let mut histogram = PositionHistogram::default();
    for position in rounds.iter().filter_map(|round| classify(round, nickname)) {
        histogram.add(position);
    }
    histogram
}
