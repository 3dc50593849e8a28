use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::ranking::{LeaderboardRow, RoundSnapshot};
use crate::reports::HistoryRow;

/// Stores every round's leaderboard
pub fn insert_leaderboards(conn: &mut DbConn, snapshots: &[RoundSnapshot]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO leaderboard_rows (round_number, tournament_id, position, nickname, position_delta, score_delta, score, twolala, participation, titles) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for snapshot in snapshots {
            for row in &snapshot.rows {
                stmt.execute(params![
                    snapshot.number as i64,
                    snapshot.tournament_id.as_str(),
                    row.position,
                    row.nickname,
                    row.position_delta,
                    row.score_delta,
                    row.score,
                    row.twolala,
                    row.participation,
                    row.titles
                ])
                .with_context(|| {
                    format!("Failed to insert {} into round {}", row.nickname, snapshot.tournament_id)
                })?;
            }
        }
    }
    tx.commit().context("Failed to commit leaderboards")
}

pub fn list_leaderboard(conn: &mut DbConn, round_number: usize) -> Result<Vec<LeaderboardRow>> {
    let sql = "SELECT position, nickname, position_delta, score_delta, score, twolala, participation, titles FROM leaderboard_rows WHERE round_number = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![round_number as i64], parse_leaderboard_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_leaderboard_row(row: &rusqlite::Row) -> rusqlite::Result<LeaderboardRow> {
    Ok(LeaderboardRow {
        position: row.get(0)?,
        nickname: row.get(1)?,
        position_delta: row.get(2)?,
        score_delta: row.get(3)?,
        score: row.get(4)?,
        twolala: row.get(5)?,
        participation: row.get(6)?,
        titles: row.get(7)?,
    })
}

pub fn insert_history(conn: &mut DbConn, history: &[HistoryRow]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO history_rows (position, nickname, score, round_deltas, underdog_victories, topdog_defeats) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for row in history {
            let round_deltas = serde_json::to_string(&row.round_deltas)?;
            stmt.execute(params![
                row.position,
                row.nickname,
                row.score,
                round_deltas,
                row.underdog_victories,
                row.topdog_defeats
            ])
            .with_context(|| format!("Failed to insert history of {}", row.nickname))?;
        }
    }
    tx.commit().context("Failed to commit season history")
}

pub fn list_history(conn: &mut DbConn) -> Result<Vec<HistoryRow>> {
    let sql = "SELECT position, nickname, score, round_deltas, underdog_victories, topdog_defeats FROM history_rows ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_history_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<HistoryRow> {
    let round_deltas: String = row.get(3)?;
    let round_deltas = serde_json::from_str(&round_deltas).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(HistoryRow {
        position: row.get(0)?,
        nickname: row.get(1)?,
        score: row.get(2)?,
        round_deltas,
        underdog_victories: row.get(4)?,
        topdog_defeats: row.get(5)?,
    })
}
