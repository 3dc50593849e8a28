use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::reports::{CareerStats, HeadToHead, JudgeParticipation};

pub fn insert_head_to_head(conn: &mut DbConn, records: &[HeadToHead]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO head_to_head (first, second, first_wins, second_wins, matches) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for record in records {
            stmt.execute(params![
                record.first,
                record.second,
                record.first_wins,
                record.second_wins,
                record.matches
            ])
            .with_context(|| format!("Failed to insert head to head {}", record.display()))?;
        }
    }
    tx.commit().context("Failed to commit head to head records")
}

pub fn list_head_to_head(conn: &mut DbConn) -> Result<Vec<HeadToHead>> {
    let sql = "SELECT first, second, first_wins, second_wins, matches FROM head_to_head ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(HeadToHead {
                first: row.get(0)?,
                second: row.get(1)?,
                first_wins: row.get(2)?,
                second_wins: row.get(3)?,
                matches: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_judges(conn: &mut DbConn, judges: &[JudgeParticipation]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO judges (nickname, participations) VALUES (?1, ?2)")?;
        for judge in judges {
            stmt.execute(params![judge.nickname, judge.participations])
                .with_context(|| format!("Failed to insert judge {}", judge.nickname))?;
        }
    }
    tx.commit().context("Failed to commit judges")
}

pub fn list_judges(conn: &mut DbConn) -> Result<Vec<JudgeParticipation>> {
    let mut stmt = conn.prepare("SELECT nickname, participations FROM judges ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(JudgeParticipation {
                nickname: row.get(0)?,
                participations: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Careers keep their full stats as a JSON document next to the sort keys
pub fn insert_careers(conn: &mut DbConn, careers: &[CareerStats]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt =
            tx.prepare("INSERT INTO careers (nickname, titles, stats) VALUES (?1, ?2, ?3)")?;
        for career in careers {
            let stats = serde_json::to_string(career)
                .with_context(|| format!("Failed to serialize career of {}", career.nickname))?;
            stmt.execute(params![career.nickname, career.titles, stats])
                .with_context(|| format!("Failed to insert career of {}", career.nickname))?;
        }
    }
    tx.commit().context("Failed to commit careers")
}

pub fn list_careers(conn: &mut DbConn) -> Result<Vec<CareerStats>> {
    let mut stmt = conn.prepare("SELECT stats FROM careers ORDER BY id")?;
    let documents = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    documents
        .iter()
        .map(|json| serde_json::from_str(json).context("Failed to parse stored career"))
        .collect()
}
