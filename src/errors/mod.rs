use thiserror::Error;

/// A result string that none of the battle grammars accept
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("battle \"{raw}\" is in an invalid format: {reason}")]
pub struct FormatError {
    pub raw: String,
    pub reason: String,
}

impl FormatError {
    pub fn new(raw: &str, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures that abort a whole season recomputation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonError {
    #[error("row {row}: {source}")]
    Format {
        row: usize,
        #[source]
        source: FormatError,
    },

    #[error("row {row}: battle \"{raw}\" is a draw, no team won more rounds than the others")]
    AmbiguousDraw { row: usize, raw: String },

    #[error("row {row}: unrecognized date \"{value}\"")]
    InvalidDate { row: usize, value: String },

    #[error("cannot score battle \"{raw}\": stage \"{label}\" is unknown")]
    UnknownStage { raw: String, label: String },

    #[error(
        "sum of round scores ({sum}) for {nickname} does not match the total score ({score})"
    )]
    Consistency {
        nickname: String,
        sum: i32,
        score: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_row_and_text() {
        let err = SeasonError::Format {
            row: 7,
            source: FormatError::new("RK vs Big Xang", "missing ' x ' separator"),
        };
        let message = err.to_string();
        assert!(message.contains("row 7"));
        assert!(message.contains("RK vs Big Xang"));
    }
}
