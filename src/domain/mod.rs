mod collection;
pub mod derivations;
pub mod models;
pub mod player;

pub use collection::{Round, RoundCollection};
pub use models::*;
pub use player::{Player, PlayerRound, Standings};
