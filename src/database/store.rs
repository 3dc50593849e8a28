use anyhow::Result;
use log::info;

use super::connection::DbConn;
use super::{matches, players, rounds, tournaments};
use crate::reports::SeasonReport;

/// Writes every output feed of a season run
pub fn save_report(conn: &mut DbConn, report: &SeasonReport) -> Result<()> {
    matches::insert_matches(conn, &report.matches)?;
    matches::insert_clarifications(conn, &report.clarifications)?;
    info!(
        "  → Stored {} battles with their clarifications",
        report.matches.len()
    );

    rounds::insert_leaderboards(conn, &report.leaderboards)?;
    rounds::insert_history(conn, &report.history)?;
    info!("  → Stored {} round leaderboards", report.leaderboards.len());

    tournaments::insert_tournaments(conn, &report.tournaments)?;
    tournaments::insert_hosts(conn, &report.hosts)?;
    tournaments::insert_warnings(conn, &report.warnings)?;
    info!(
        "  → Stored {} editions, {} hosts, {} warnings",
        report.tournaments.len(),
        report.hosts.len(),
        report.warnings.len()
    );

    players::insert_head_to_head(conn, &report.head_to_head)?;
    players::insert_judges(conn, &report.judges)?;
    players::insert_careers(conn, &report.careers)?;
    info!(
        "  → Stored {} head to head records, {} judges, {} careers",
        report.head_to_head.len(),
        report.judges.len(),
        report.careers.len()
    );

    Ok(())
}
