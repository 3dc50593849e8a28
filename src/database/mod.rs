pub mod connection;
pub mod matches;
pub mod players;
pub mod rounds;
pub mod setup;
pub mod store;
pub mod tournaments;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use store::save_report;
