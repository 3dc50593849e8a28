use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::reports::{HostEditions, TournamentRollup};

pub fn insert_tournaments(conn: &mut DbConn, rollups: &[TournamentRollup]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO tournaments (date, host, champions, runners_up) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for rollup in rollups {
            stmt.execute(params![rollup.date, rollup.host, rollup.champions, rollup.runners_up])
                .with_context(|| format!("Failed to insert edition {} {}", rollup.date, rollup.host))?;
        }
    }
    tx.commit().context("Failed to commit editions")
}

pub fn list_tournaments(conn: &mut DbConn) -> Result<Vec<TournamentRollup>> {
    let sql = "SELECT date, host, champions, runners_up FROM tournaments ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TournamentRollup {
                date: row.get(0)?,
                host: row.get(1)?,
                champions: row.get(2)?,
                runners_up: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_hosts(conn: &mut DbConn, hosts: &[HostEditions]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO hosts (host, editions) VALUES (?1, ?2)")?;
        for host in hosts {
            stmt.execute(params![host.host, host.editions])
                .with_context(|| format!("Failed to insert host {}", host.host))?;
        }
    }
    tx.commit().context("Failed to commit hosts")
}

pub fn list_hosts(conn: &mut DbConn) -> Result<Vec<HostEditions>> {
    let mut stmt = conn.prepare("SELECT host, editions FROM hosts ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(HostEditions {
                host: row.get(0)?,
                editions: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_warnings(conn: &mut DbConn, warnings: &[String]) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO warnings (message) VALUES (?1)")?;
        for warning in warnings {
            stmt.execute(params![warning])?;
        }
    }
    tx.commit().context("Failed to commit warnings")
}

pub fn list_warnings(conn: &mut DbConn) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT message FROM warnings ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(rows)
}
