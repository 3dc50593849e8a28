use anyhow::{Context, Result};
use log::info;

use super::connection::DbConn;

/// Drops and recreates every output table
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    let statements = split_sql_statements(include_str!("schema.sql"));

    for (idx, statement) in statements.iter().enumerate() {
        conn.execute(statement, [])
            .with_context(|| format!("Failed to execute schema statement {}", idx + 1))?;
    }

    info!("Database schema reset ({} statements)", statements.len());
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_splits_into_statements() {
        let statements = split_sql_statements("CREATE TABLE a (x);\n\n  DROP TABLE b ;\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "DROP TABLE b"]);
    }

    #[test]
    fn bundled_schema_has_no_empty_statements() {
        let statements = split_sql_statements(include_str!("schema.sql"));
        assert!(statements.iter().all(|s| s.starts_with("DROP") || s.starts_with("CREATE")));
    }
}
