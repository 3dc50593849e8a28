use serde::{Deserialize, Serialize};

use crate::domain::MatchId;

/// Point changes produced by one battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    pub winner_delta: i32,
    pub loser_delta: i32,
    pub narrative: String,
    pub was_underdog_upset: bool,
}

/// Audit note explaining how a battle was scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clarification {
    pub match_id: MatchId,
    pub text: String,
}
