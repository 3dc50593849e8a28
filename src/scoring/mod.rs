pub mod match_score;
pub mod types;

pub use match_score::score_match;
pub use types::{Clarification, MatchScore};
