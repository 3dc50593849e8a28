use log::debug;

use super::types::MatchScore;
use crate::config::ScoringSettings;
use crate::domain::{join_names, Match, Mode, Stage, Standings};
use crate::errors::SeasonError;

/// Scores one battle.
///
/// `prior` holds the standings at the start of the round and decides
/// upsets; `current` holds the standings mid-round and is only used for
/// the before/after lines of the narrative.
pub fn score_match(
    m: &Match,
    round_number: usize,
    prior: &Standings,
    current: &Standings,
    settings: &ScoringSettings,
) -> Result<MatchScore, SeasonError> {
    let winners = join_names(&m.winners);
    let mut narrative = Narrative::new(round_number, m);

    let mut winner_delta = base_points(m, settings)?;
    narrative.line(format!("{}: +{}", winners, winner_delta));

    if m.is_twolala {
        winner_delta += settings.twolala_bonus;
        narrative.line(format!("{}: +{} (twolala)", winners, settings.twolala_bonus));
    }

    if settings.split_duo_points && m.mode == Mode::Duo {
        let split = ceil_half(winner_delta);
        narrative.blank();
        narrative.line(format!(
            "Batalha de dupla: {} pontos divididos por 2 e arredondados para cima ({})",
            winner_delta, split
        ));
        winner_delta = split;
    }

    let mut loser_delta = 0;
    let was_underdog_upset = is_underdog_upset(m, prior);
    if was_underdog_upset {
        winner_delta += settings.underdog_steal;
        loser_delta -= settings.underdog_steal;
        narrative.blank();
        narrative.line(format!(
            "Vitória do desfavorecido: {} rouba {} ponto de {}",
            winners,
            settings.underdog_steal,
            join_names(&m.losers)
        ));
    }

    narrative.final_scores(m, current, winner_delta, loser_delta);
    let narrative = narrative.finish();
    debug!("{}", narrative);

    Ok(MatchScore {
        winner_delta,
        loser_delta,
        narrative,
        was_underdog_upset,
    })
}

fn base_points(m: &Match, settings: &ScoringSettings) -> Result<i32, SeasonError> {
    match m.stage {
        Stage::Unknown => Err(SeasonError::UnknownStage {
            raw: m.raw.clone(),
            label: m.stage_label.clone(),
        }),
        Stage::EightFinals => Ok(settings.eight_finals_points),
        Stage::QuarterFinals | Stage::SemiFinals | Stage::Finals => {
            Ok(settings.later_stage_points)
        }
    }
}

/// Duo teammates share the points, rounding in their favour
fn ceil_half(points: i32) -> i32 {
    (points + 1).div_euclid(2)
}

/// Lower-ranked solo player beat a higher-ranked one, judged on round-start scores
fn is_underdog_upset(m: &Match, prior: &Standings) -> bool {
    if m.mode != Mode::Solo || m.is_wo {
        return false;
    }

    match (m.winners.as_slice(), m.losers.as_slice()) {
        ([winner], [loser]) => prior.score_of(winner) < prior.score_of(loser),
        _ => false,
    }
}

struct Narrative {
    lines: Vec<String>,
}

impl Narrative {
    fn new(round_number: usize, m: &Match) -> Self {
        Self {
            lines: vec![
                format!(
                    "{}ª Rodada - {}ª Batalha da Temporada",
                    round_number,
                    m.id + 1
                ),
                String::new(),
                format!("{} ({})", m.raw, m.stage.display_name()),
                String::new(),
            ],
        }
    }

    fn line(&mut self, text: String) {
        self.lines.push(text);
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn final_scores(&mut self, m: &Match, current: &Standings, winner_delta: i32, loser_delta: i32) {
        self.blank();
        self.line("Pontuação final:".to_string());

        for winner in &m.winners {
            let before = current.score_of(winner);
            self.line(format!(
                "{}: {} -> {} (+{})",
                winner,
                before,
                before + winner_delta,
                winner_delta
            ));
        }

        if loser_delta != 0 {
            for loser in &m.losers {
                let before = current.score_of(loser);
                self.line(format!(
                    "{}: {} -> {} ({})",
                    loser,
                    before,
                    before + loser_delta,
                    loser_delta
                ));
            }
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
