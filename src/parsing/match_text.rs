use anyhow::{Context, Result};
use regex::Regex;

use std::collections::HashSet;

use crate::domain::{player_key, ParsedResult, Team};
use crate::errors::FormatError;

const MAX_TEAM_SIZE: usize = 4;

/// Turns hand-typed battle results into teams.
///
/// Grammars, first match wins:
/// 1. walkover with no opponent: `Barb, Giza (WO)`
/// 2. starred winner: `Onec x Jhones*`
/// 3. scored two-team: `RK 2 x 0 Big Xang`, `Eva e Isa 2x1 Mont e Onec`
/// 4. scored double-three: `A 2 x B 1 x C 0`
pub struct MatchParser {
    scored_regex: Regex,
    versus_regex: Regex,
    walkover_regex: Regex,
    annotation_regex: Regex,
}

impl MatchParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scored_regex: Self::compile(r"\s(\d)\s?x\s?(\d)\s", "score")?,
            versus_regex: Self::compile(r"\s+x\s+", "versus")?,
            walkover_regex: Self::compile(r"(?i)\(\s*w\.?\s*o\.?\s*\)", "walkover")?,
            annotation_regex: Self::compile(r"\([^)]*\)", "annotation")?,
        })
    }

    fn compile(pattern: &str, name: &str) -> Result<Regex> {
        Regex::new(pattern).with_context(|| format!("Failed to compile {} regex", name))
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedResult, FormatError> {
        let is_wo = self.walkover_regex.is_match(raw);
        let text = self.clean(raw);

        if text.is_empty() {
            return Err(FormatError::new(raw, "empty battle text"));
        }

        let has_versus = self.versus_regex.is_match(&text) || self.scored_regex.is_match(&text);

        let teams = if !has_versus {
            if !is_wo {
                return Err(FormatError::new(raw, "missing ' x ' separator"));
            }
            self.parse_walkover(raw, &text)?
        } else if text.contains('*') {
            self.parse_starred(raw, &text)?
        } else if let Some(teams) = self.parse_scored(raw, &text)? {
            teams
        } else {
            self.parse_double_three(raw, &text)?
        };

        check_distinct_players(raw, &teams)?;
        Ok(ParsedResult { teams, is_wo })
    }

    // --- Preprocessing ---

    fn clean(&self, raw: &str) -> String {
        let without_notes = self.annotation_regex.replace_all(raw, " ");
        without_notes
            .trim()
            .trim_end_matches('.')
            .trim()
            .to_string()
    }

    fn has_separator(&self, segment: &str) -> bool {
        let padded = format!(" {} ", segment);
        self.versus_regex.is_match(&padded) || self.scored_regex.is_match(&padded)
    }

    // --- Grammars ---

    fn parse_walkover(&self, raw: &str, text: &str) -> Result<Vec<Team>, FormatError> {
        let players = split_names(raw, text)?;
        Ok(vec![Team::new(players, 0)])
    }

    fn parse_starred(&self, raw: &str, text: &str) -> Result<Vec<Team>, FormatError> {
        let segments: Vec<&str> = self.versus_regex.split(text).collect();
        if segments.len() != 2 {
            return Err(FormatError::new(
                raw,
                "a starred battle needs exactly two teams",
            ));
        }

        segments
            .into_iter()
            .map(|segment| {
                let rounds_won = u32::from(segment.contains('*'));
                let players = split_names(raw, &segment.replace('*', ""))?;
                Ok(Team::new(players, rounds_won))
            })
            .collect()
    }

    fn parse_scored(&self, raw: &str, text: &str) -> Result<Option<Vec<Team>>, FormatError> {
        let Some(captures) = self.scored_regex.captures(text) else {
            return Ok(None);
        };
        let Some(separator) = captures.get(0) else {
            return Ok(None);
        };

        let left = &text[..separator.start()];
        let right = &text[separator.end()..];
        if [left, right].iter().any(|segment| self.has_separator(segment)) {
            return Err(FormatError::new(
                raw,
                "a scored battle needs exactly two teams",
            ));
        }
        let scores = [&captures[1], &captures[2]];

        [left, right]
            .into_iter()
            .zip(scores)
            .map(|(segment, score)| {
                let players = split_names(raw, segment)?;
                Ok(Team::new(players, parse_digit(raw, score)?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn parse_double_three(&self, raw: &str, text: &str) -> Result<Vec<Team>, FormatError> {
        let segments: Vec<&str> = self.versus_regex.split(text).collect();
        if segments.len() != 3 {
            return Err(FormatError::new(raw, "no score, winner mark or walkover found"));
        }

        segments
            .into_iter()
            .map(|segment| {
                let segment = segment.trim();
                let Some(last) = segment.chars().last().filter(|c| c.is_ascii_digit()) else {
                    return Err(FormatError::new(
                        raw,
                        format!("double-three entry \"{}\" does not end with its score", segment),
                    ));
                };
                let nickname = segment[..segment.len() - last.len_utf8()].trim();
                if nickname.is_empty() {
                    return Err(FormatError::new(raw, "double-three entry without a nickname"));
                }
                Ok(Team::new(
                    vec![nickname.to_string()],
                    parse_digit(raw, &last.to_string())?,
                ))
            })
            .collect()
    }
}

/// Splits "A, B e C" into its nicknames
fn split_names(raw: &str, segment: &str) -> Result<Vec<String>, FormatError> {
    let players: Vec<String> = segment
        .replace(',', " e ")
        .split(" e ")
        .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    if players.iter().any(|name| name.is_empty()) {
        return Err(FormatError::new(raw, "team with an empty nickname"));
    }
    if players.len() > MAX_TEAM_SIZE {
        return Err(FormatError::new(
            raw,
            format!("teams have at most {} players", MAX_TEAM_SIZE),
        ));
    }

    Ok(players)
}

/// A nickname may appear only once per battle, on any team
fn check_distinct_players(raw: &str, teams: &[Team]) -> Result<(), FormatError> {
    let mut seen = HashSet::new();
    for nickname in teams.iter().flat_map(|team| team.players.iter()) {
        if !seen.insert(player_key(nickname)) {
            return Err(FormatError::new(
                raw,
                format!("\"{}\" appears more than once", nickname),
            ));
        }
    }
    Ok(())
}

fn parse_digit(raw: &str, digit: &str) -> Result<u32, FormatError> {
    digit
        .parse()
        .map_err(|_| FormatError::new(raw, format!("\"{}\" is not a score", digit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParsedResult {
        MatchParser::new().unwrap().parse(raw).unwrap()
    }

    fn players(team: &Team) -> Vec<&str> {
        team.players.iter().map(String::as_str).collect()
    }

    #[test]
    fn scored_one_on_one() {
        let result = parse("RK 2 x 0 Big Xang");
        assert!(!result.is_wo);
        assert_eq!(result.teams.len(), 2);
        assert_eq!(players(&result.teams[0]), vec!["RK"]);
        assert_eq!(result.teams[0].rounds_won, 2);
        assert_eq!(players(&result.teams[1]), vec!["Big Xang"]);
        assert_eq!(result.teams[1].rounds_won, 0);
    }

    #[test]
    fn scored_without_spaces_around_x() {
        let result = parse("RK 2x1 Big Xang.");
        assert_eq!(players(&result.teams[1]), vec!["Big Xang"]);
        assert_eq!(result.teams[1].rounds_won, 1);
    }

    #[test]
    fn synthesized_scores_keep_team_order() {
        let parser = MatchParser::new().unwrap();
        for n in 0..=3 {
            for m in 0..=3 {
                let result = parser.parse(&format!("Alpha {n} x {m} Bravo")).unwrap();
                assert_eq!(players(&result.teams[0]), vec!["Alpha"]);
                assert_eq!(players(&result.teams[1]), vec!["Bravo"]);
                assert_eq!(result.teams[0].rounds_won, n);
                assert_eq!(result.teams[1].rounds_won, m);
            }
        }
    }

    #[test]
    fn trio_against_duo() {
        let result = parse("Eva, Isa e Mara 2 x 1 Mont e Onec");
        assert_eq!(players(&result.teams[0]), vec!["Eva", "Isa", "Mara"]);
        assert_eq!(result.teams[0].rounds_won, 2);
        assert_eq!(players(&result.teams[1]), vec!["Mont", "Onec"]);
        assert_eq!(result.teams[1].rounds_won, 1);
    }

    #[test]
    fn walkover_without_opponent() {
        let result = parse("Barb, Giza (WO)");
        assert!(result.is_wo);
        assert_eq!(result.teams.len(), 1);
        assert_eq!(players(&result.teams[0]), vec!["Barb", "Giza"]);
        assert_eq!(result.teams[0].rounds_won, 0);
    }

    #[test]
    fn walkover_marker_is_case_insensitive() {
        let result = parse("Onec x Jhones* (wo)");
        assert!(result.is_wo);
        assert_eq!(result.teams[1].rounds_won, 1);
    }

    #[test]
    fn starred_winner() {
        let result = parse("Onec x Jhones*");
        assert!(!result.is_wo);
        assert_eq!(players(&result.teams[0]), vec!["Onec"]);
        assert_eq!(result.teams[0].rounds_won, 0);
        assert_eq!(players(&result.teams[1]), vec!["Jhones"]);
        assert_eq!(result.teams[1].rounds_won, 1);
    }

    #[test]
    fn starred_duo_winner() {
        let result = parse("Blink e Killer* x Kenny e Kennyzin");
        assert_eq!(players(&result.teams[0]), vec!["Blink", "Killer"]);
        assert_eq!(result.teams[0].rounds_won, 1);
        assert_eq!(players(&result.teams[1]), vec!["Kenny", "Kennyzin"]);
        assert_eq!(result.teams[1].rounds_won, 0);
    }

    #[test]
    fn double_three() {
        let result = parse("Onec 2 x Xavier 1 x Mont 0");
        assert_eq!(result.teams.len(), 3);
        assert_eq!(players(&result.teams[0]), vec!["Onec"]);
        assert_eq!(result.teams[0].rounds_won, 2);
        assert_eq!(players(&result.teams[2]), vec!["Mont"]);
        assert_eq!(result.teams[2].rounds_won, 0);
    }

    #[test]
    fn parenthetical_notes_are_dropped() {
        let result = parse("RK 2 x 0 Big Xang (revanche)");
        assert_eq!(players(&result.teams[1]), vec!["Big Xang"]);
    }

    #[test]
    fn rejects_text_without_separator() {
        let err = MatchParser::new().unwrap().parse("RK venceu Big Xang").unwrap_err();
        assert_eq!(err.raw, "RK venceu Big Xang");
    }

    #[test]
    fn rejects_two_teams_without_score_or_star() {
        assert!(MatchParser::new().unwrap().parse("RK x Big Xang").is_err());
    }

    #[test]
    fn rejects_double_three_without_scores() {
        assert!(MatchParser::new().unwrap().parse("A x B x C").is_err());
    }

    #[test]
    fn rejects_scored_battle_with_a_third_team() {
        let parser = MatchParser::new().unwrap();
        let err = parser.parse("A 2 x 0 B x C").unwrap_err();
        assert_eq!(err.reason, "a scored battle needs exactly two teams");
        assert!(parser.parse("A x B 2 x 0 C").is_err());
        assert!(parser.parse("A 2 x 0 B 1 x 0 C").is_err());
    }

    #[test]
    fn rejects_player_listed_twice() {
        let parser = MatchParser::new().unwrap();
        let err = parser.parse("Ace 2 x 0 ace").unwrap_err();
        assert!(err.reason.contains("appears more than once"));
        assert!(parser.parse("Eva e  EVA 2 x 1 Mont").is_err());
        assert!(parser.parse("Onec 2 x Xavier 1 x onec 0").is_err());
    }

    #[test]
    fn rejects_empty_team() {
        assert!(MatchParser::new().unwrap().parse(" 2 x 0 Big Xang").is_err());
    }
}
