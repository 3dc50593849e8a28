use crate::domain::Stage;

/// Phase label as typed by the organizers in the results sheet
///
/// Labels are compared after lowercasing and collapsing whitespace, so
/// "Oitavas de Final" and "oitavas  de final" resolve to the same stage.
#[derive(Debug, Clone)]
pub struct StageLabel {
    pub label: &'static str,
    pub stage: Stage,
}

impl StageLabel {
    pub fn new(label: &'static str, stage: Stage) -> Self {
        Self { label, stage }
    }
}

/// Get the list of recognized phase labels
pub fn get_stage_labels() -> Vec<StageLabel> {
    vec![
        StageLabel::new("oitavas de final", Stage::EightFinals),
        StageLabel::new("quartas de final", Stage::QuarterFinals),
        StageLabel::new("semifinal", Stage::SemiFinals),
        StageLabel::new("semi final", Stage::SemiFinals),
        StageLabel::new("semifinais", Stage::SemiFinals),
        StageLabel::new("final", Stage::Finals),
    ]
}

pub fn stage_for_label(label: &str) -> Stage {
    let normalized = normalize_label(label);
    get_stage_labels()
        .into_iter()
        .find(|entry| entry.label == normalized)
        .map(|entry| entry.stage)
        .unwrap_or(Stage::Unknown)
}

/// Localized name shown in tables and score clarifications
pub fn display_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Unknown => "Fase desconhecida",
        Stage::EightFinals => "Oitavas de final",
        Stage::QuarterFinals => "Quartas de final",
        Stage::SemiFinals => "Semifinal",
        Stage::Finals => "Final",
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semifinal_synonyms_resolve_to_the_same_stage() {
        for label in ["Semifinal", "semi final", "SEMIFINAIS", "  Semi   Final "] {
            assert_eq!(stage_for_label(label), Stage::SemiFinals, "label {label:?}");
        }
    }

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(stage_for_label("Oitavas de Final"), Stage::EightFinals);
        assert_eq!(stage_for_label("QUARTAS DE FINAL"), Stage::QuarterFinals);
        assert_eq!(stage_for_label("Final"), Stage::Finals);
    }

    #[test]
    fn unrecognized_label_is_unknown() {
        assert_eq!(stage_for_label("Repescagem"), Stage::Unknown);
        assert_eq!(stage_for_label(""), Stage::Unknown);
    }

    #[test]
    fn every_stage_has_a_display_name() {
        assert_eq!(display_name(Stage::EightFinals), "Oitavas de final");
        assert_eq!(display_name(Stage::Finals), "Final");
    }
}
