pub mod match_text;
pub mod rows;

pub use match_text::MatchParser;
pub use rows::{
    editions_from_rows, parse_date, read_edition_rows, read_match_rows, EditionRow,
    MatchAssembler, MatchRow,
};
