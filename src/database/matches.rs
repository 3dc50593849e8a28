use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::reports::MatchTableRow;
use crate::scoring::Clarification;

pub fn insert_matches(conn: &mut DbConn, rows: &[MatchTableRow]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO matches (match_id, date, host, stage, battle, winners, losers) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for row in rows {
            stmt.execute(params![
                row.match_id as i64,
                row.date,
                row.host,
                row.stage,
                row.battle,
                row.winners,
                row.losers
            ])
            .with_context(|| format!("Failed to insert battle {}", row.match_id))?;
        }
    }
    tx.commit().context("Failed to commit battles")
}

pub fn list_matches(conn: &mut DbConn) -> Result<Vec<MatchTableRow>> {
    let sql = "SELECT match_id, date, host, stage, battle, winners, losers FROM matches ORDER BY match_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchTableRow> {
    Ok(MatchTableRow {
        match_id: row.get::<_, i64>(0)? as usize,
        date: row.get(1)?,
        host: row.get(2)?,
        stage: row.get(3)?,
        battle: row.get(4)?,
        winners: row.get(5)?,
        losers: row.get(6)?,
    })
}

/// Expects the battles to be stored already
pub fn insert_clarifications(conn: &mut DbConn, clarifications: &[Clarification]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO clarifications (match_id, text) VALUES (?1, ?2)")?;
        for clarification in clarifications {
            stmt.execute(params![clarification.match_id as i64, clarification.text])
                .with_context(|| {
                    format!("Failed to insert clarification of battle {}", clarification.match_id)
                })?;
        }
    }
    tx.commit().context("Failed to commit clarifications")
}

pub fn list_clarifications(conn: &mut DbConn) -> Result<Vec<Clarification>> {
    let mut stmt = conn.prepare("SELECT match_id, text FROM clarifications ORDER BY match_id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Clarification {
                match_id: row.get::<_, i64>(0)? as usize,
                text: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
