use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::stages;

/// Ordinal of a battle among the non-blank rows of its source sheet
pub type MatchId = usize;

/// Tournament phase, ordered by progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Unknown,
    EightFinals,
    QuarterFinals,
    SemiFinals,
    Finals,
}

impl Stage {
    pub fn from_label(label: &str) -> Self {
        stages::stage_for_label(label)
    }

    pub fn display_name(&self) -> &'static str {
        stages::display_name(*self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Solo,
    Duo,
    Trio,
    Quartet,
    DoubleThree,
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Solo => "Solo",
            Mode::Duo => "Duo",
            Mode::Trio => "Trio",
            Mode::Quartet => "Quarteto",
            Mode::DoubleThree => "Double-Three",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub players: Vec<String>,
    pub rounds_won: u32,
}

impl Team {
    pub fn new(players: Vec<String>, rounds_won: u32) -> Self {
        Self {
            players,
            rounds_won,
        }
    }

    pub fn contains(&self, nickname: &str) -> bool {
        let key = player_key(nickname);
        self.players.iter().any(|p| player_key(p) == key)
    }
}

/// What the text parser extracts from one raw result string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResult {
    pub teams: Vec<Team>,
    pub is_wo: bool,
}

/// Round key: `normalize(date) + "-" + normalize(host)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(String);

impl TournamentId {
    pub fn from_parts(date: NaiveDate, host: &str) -> Self {
        let host = host
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        Self(format!("{}-{}", date.format("%Y-%m-%d"), host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: Option<u32>,
    pub date: NaiveDate,
    pub host: String,
    pub stage: Stage,
    pub stage_label: String,
    pub raw: String,
    pub teams: Vec<Team>,
    pub mode: Mode,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
    pub is_wo: bool,
    pub is_twolala: bool,
    #[serde(default)]
    pub judges: Vec<String>,
}

impl Match {
    pub fn involves(&self, nickname: &str) -> bool {
        self.teams.iter().any(|team| team.contains(nickname))
    }

    pub fn is_winner(&self, nickname: &str) -> bool {
        let key = player_key(nickname);
        self.winners.iter().any(|w| player_key(w) == key)
    }

    pub fn is_loser(&self, nickname: &str) -> bool {
        let key = player_key(nickname);
        self.losers.iter().any(|l| player_key(l) == key)
    }

    /// Two single-player teams, not a walkover
    pub fn is_one_on_one(&self) -> bool {
        !self.is_wo && self.teams.len() == 2 && self.teams.iter().all(|t| t.players.len() == 1)
    }

    pub fn players(&self) -> impl Iterator<Item = &String> {
        self.teams.iter().flat_map(|team| team.players.iter())
    }
}

/// A round of the season as listed in the editions index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub date: NaiveDate,
    pub host: String,
}

impl Edition {
    pub fn id(&self) -> TournamentId {
        TournamentId::from_parts(self.date, &self.host)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub date: NaiveDate,
    pub host: String,
    pub round: Option<u32>,
    pub champions: Vec<String>,
    pub runners_up: Vec<String>,
    pub matches: Vec<MatchId>,
}

/// Matching key for nicknames: case and whitespace insensitive
pub fn player_key(nickname: &str) -> String {
    nickname
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Joins names as "A, B e C"
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} e {}", init.join(", "), last),
    }
}
