use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use log::{info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::match_text::MatchParser;
use crate::domain::derivations;
use crate::domain::{Edition, Match, ParsedResult, Stage, TournamentId};
use crate::errors::SeasonError;

/// One row of the battles sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub battle: String,
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub judges: String,
    /// Line of the source file the row was read from
    #[serde(skip)]
    pub line: Option<usize>,
}

impl MatchRow {
    pub fn is_blank(&self) -> bool {
        [&self.date, &self.host, &self.stage, &self.battle, &self.judges]
            .iter()
            .all(|field| field.trim().is_empty())
            && self.round.is_none()
    }
}

/// One row of the editions index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub host: String,
    #[serde(skip)]
    pub line: Option<usize>,
}

/// Rows that remember where in the file they came from
trait SheetRow {
    fn set_line(&mut self, line: usize);
}

impl SheetRow for MatchRow {
    fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }
}

impl SheetRow for EditionRow {
    fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }
}

/// Values a blank cell inherits from the rows above it
#[derive(Debug, Default)]
struct Carried {
    date: String,
    host: String,
    stage: String,
    round: Option<u32>,
}

impl Carried {
    fn update(&mut self, row: &MatchRow) {
        carry(&mut self.date, &row.date);
        carry(&mut self.host, &row.host);
        carry(&mut self.stage, &row.stage);
        if row.round.is_some() {
            self.round = row.round;
        }
    }
}

fn carry(slot: &mut String, value: &str) {
    if !value.trim().is_empty() {
        *slot = value.trim().to_string();
    }
}

/// Builds validated battles out of sheet rows
pub struct MatchAssembler {
    parser: MatchParser,
}

impl MatchAssembler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: MatchParser::new()?,
        })
    }

    /// Parses every non-blank row; the first bad row fails the batch.
    ///
    /// Errors name the file line a row was read from, or its 1-based
    /// position in `rows` when it was built in memory. A row with no battle
    /// text still updates the carried cells but yields no battle.
    pub fn assemble(&self, rows: &[MatchRow]) -> Result<Vec<Match>, SeasonError> {
        let mut carried = Carried::default();
        let mut matches = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            let row_number = row.line.unwrap_or(idx + 1);
            carried.update(row);
            if row.battle.trim().is_empty() {
                warn!("Row {}: no battle text, skipping", row_number);
                continue;
            }
            let m = self.build_match(row_number, matches.len(), row, &carried)?;
            matches.push(m);
        }

        info!("Assembled {} battles from {} rows", matches.len(), rows.len());
        Ok(matches)
    }

    fn build_match(
        &self,
        row_number: usize,
        id: usize,
        row: &MatchRow,
        carried: &Carried,
    ) -> Result<Match, SeasonError> {
        let date = parse_date(&carried.date).ok_or_else(|| SeasonError::InvalidDate {
            row: row_number,
            value: carried.date.clone(),
        })?;

        let raw = row.battle.trim().to_string();
        let ParsedResult { teams, is_wo } = self
            .parser
            .parse(&raw)
            .map_err(|source| SeasonError::Format {
                row: row_number,
                source,
            })?;

        if derivations::is_draw(&teams, is_wo) {
            return Err(SeasonError::AmbiguousDraw {
                row: row_number,
                raw,
            });
        }

        let winners = derivations::get_winners(&teams, is_wo);
        let losers = derivations::get_losers(&teams);
        if is_wo && teams.len() == 1 {
            warn!(
                "Row {}: walkover \"{}\" has no recorded opponent, needs manual review",
                row_number, raw
            );
        }

        Ok(Match {
            id,
            tournament_id: TournamentId::from_parts(date, &carried.host),
            round: carried.round,
            date,
            host: carried.host.clone(),
            stage: Stage::from_label(&carried.stage),
            stage_label: carried.stage.clone(),
            mode: derivations::get_mode(&teams),
            is_twolala: derivations::is_twolala(&teams, is_wo),
            winners,
            losers,
            is_wo,
            judges: split_judges(&row.judges),
            raw,
            teams,
        })
    }
}

fn split_judges(cell: &str) -> Vec<String> {
    cell.replace(',', " e ")
        .split(" e ")
        .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY` and RFC 3339 timestamps
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%d/%m/%Y") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn editions_from_rows(rows: &[EditionRow]) -> Result<Vec<Edition>, SeasonError> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| !(row.date.trim().is_empty() && row.host.trim().is_empty()))
        .map(|(idx, row)| {
            let date = parse_date(&row.date).ok_or_else(|| SeasonError::InvalidDate {
                row: row.line.unwrap_or(idx + 1),
                value: row.date.clone(),
            })?;
            Ok(Edition {
                date,
                host: row.host.trim().to_string(),
            })
        })
        .collect()
}

pub fn read_match_rows<P: AsRef<Path>>(path: P) -> Result<Vec<MatchRow>> {
    read_rows(path.as_ref())
}

pub fn read_edition_rows<P: AsRef<Path>>(path: P) -> Result<Vec<EditionRow>> {
    read_rows(path.as_ref())
}

// Empty lines never reach `records()`, so each row keeps its own file line.
fn read_rows<T: DeserializeOwned + SheetRow>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read headers from {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read rows from {}", path.display()))?;
        let line = record.position().map_or(0, |pos| pos.line() as usize);
        let mut row: T = record
            .deserialize(Some(&headers))
            .with_context(|| format!("Failed to read line {} of {}", line, path.display()))?;
        row.set_line(line);
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mode;

    fn row(date: &str, host: &str, stage: &str, battle: &str) -> MatchRow {
        MatchRow {
            date: date.to_string(),
            host: host.to_string(),
            stage: stage.to_string(),
            battle: battle.to_string(),
            ..Default::default()
        }
    }

    fn assemble(rows: &[MatchRow]) -> Result<Vec<Match>, SeasonError> {
        MatchAssembler::new().unwrap().assemble(rows)
    }

    #[test]
    fn blank_stage_carries_forward() {
        let matches = assemble(&[
            row("2024-03-09", "Praça", "Oitavas de final", "A 2 x 1 B"),
            row("", "", "", "C 2 x 0 D"),
            row("", "", "Final", "A 2 x 0 C"),
        ])
        .unwrap();

        assert_eq!(matches[1].stage, Stage::EightFinals);
        assert_eq!(matches[1].host, "Praça");
        assert_eq!(matches[2].stage, Stage::Finals);
    }

    #[test]
    fn blank_rows_are_skipped_and_ids_stay_dense() {
        let matches = assemble(&[
            row("2024-03-09", "Praça", "Final", "A 2 x 1 B"),
            MatchRow::default(),
            row("2024-03-16", "Beco", "Final", "C 2 x 0 D"),
        ])
        .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].id, 1);
        assert_eq!(matches[1].tournament_id.as_str(), "2024-03-16-beco");
    }

    #[test]
    fn derived_fields_are_filled() {
        let matches = assemble(&[row("09/03/2024", "Praça", "Final", "RK 2 x 0 Big Xang")]).unwrap();
        let m = &matches[0];
        assert_eq!(m.mode, Mode::Solo);
        assert!(m.is_twolala);
        assert_eq!(m.winners, vec!["RK"]);
        assert_eq!(m.losers, vec!["Big Xang"]);
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn walkover_without_opponent_has_no_losers() {
        let matches = assemble(&[row("2024-03-09", "Praça", "Oitavas de final", "Barb, Giza (WO)")]).unwrap();
        let m = &matches[0];
        assert!(m.is_wo);
        assert!(!m.is_twolala);
        assert!(m.losers.is_empty());
        assert_eq!(m.winners, vec!["Barb", "Giza"]);
    }

    #[test]
    fn format_error_reports_row_number() {
        let err = assemble(&[
            row("2024-03-09", "Praça", "Final", "A 2 x 1 B"),
            row("", "", "", "A contra B"),
        ])
        .unwrap_err();

        match err {
            SeasonError::Format { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source.raw, "A contra B");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn player_on_both_sides_fails_the_batch() {
        let err = assemble(&[
            row("2024-03-09", "Praça", "Oitavas de final", "A 2 x 1 B"),
            row("", "", "Final", "Ace 2 x 0 ace"),
        ])
        .unwrap_err();

        match err {
            SeasonError::Format { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source.raw, "Ace 2 x 0 ace");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rows_without_battle_text_are_skipped() {
        let matches = assemble(&[
            row("2024-03-09", "Praça", "Oitavas de final", ""),
            row("", "", "", "A 2 x 1 B"),
        ])
        .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 0);
        assert_eq!(matches[0].host, "Praça");
        assert_eq!(matches[0].stage, Stage::EightFinals);
    }

    #[test]
    fn errors_name_the_source_line_when_known() {
        let mut bad = row("", "", "", "A contra B");
        bad.line = Some(5);
        let err = assemble(&[row("2024-03-09", "Praça", "Final", "A 2 x 1 B"), bad]).unwrap_err();
        assert!(matches!(err, SeasonError::Format { row: 5, .. }));
    }

    #[test]
    fn draws_are_rejected() {
        let err = assemble(&[row("2024-03-09", "Praça", "Final", "A 1 x 1 B")]).unwrap_err();
        assert!(matches!(err, SeasonError::AmbiguousDraw { row: 1, .. }));
    }

    #[test]
    fn unknown_stage_is_kept_for_the_scorer_to_reject() {
        let matches = assemble(&[row("2024-03-09", "Praça", "Repescagem", "A 2 x 1 B")]).unwrap();
        assert_eq!(matches[0].stage, Stage::Unknown);
        assert_eq!(matches[0].stage_label, "Repescagem");
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = assemble(&[row("sábado", "Praça", "Final", "A 2 x 1 B")]).unwrap_err();
        assert!(matches!(err, SeasonError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn judges_are_split_like_teams() {
        let mut judged = row("2024-03-09", "Praça", "Final", "A 2 x 1 B");
        judged.judges = "Xavier, Lua e Mont".to_string();
        let matches = assemble(&[judged]).unwrap();
        assert_eq!(matches[0].judges, vec!["Xavier", "Lua", "Mont"]);
    }

    #[test]
    fn parses_supported_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_date("2024-03-09"), expected);
        assert_eq!(parse_date("09/03/2024"), expected);
        assert_eq!(parse_date("2024-03-09T21:00:00-03:00"), expected);
        assert_eq!(parse_date("março"), None);
    }
}
