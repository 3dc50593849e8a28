pub mod leaderboard;
pub mod season;

pub use leaderboard::{compare_players, LeaderboardRow};
pub use season::{rank_season, RoundSnapshot, SeasonResult};
