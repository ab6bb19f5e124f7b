//! Chess Tutor Core Library

use shakmaty::Square;

pub mod board;
pub mod device;
pub mod error;
pub mod history;

pub use board::{
    BoardAdapter, BoardConfig, BoardMode, BoardRenderer, DestinationMap, InteractionPolicy,
    MoveRecord, RulesEngine, ShakmatyRules, STARTING_FEN,
};
pub use device::DeviceLink;
pub use error::{Error, Result};
pub use history::{GameRecord, GameResult, HistoryStats, ResultFilter, SortKey};

/// Parses a two-character square identifier like "e2".
pub fn parse_square(s: &str) -> Result<Square> {
    let lower = s.trim().to_ascii_lowercase();
    Square::from_ascii(lower.as_bytes()).map_err(|_| Error::InvalidSquare(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_identifiers_parse_case_insensitively() {
        assert_eq!(parse_square("e2").unwrap(), Square::E2);
        assert_eq!(parse_square(" H8 ").unwrap(), Square::H8);
        assert!(matches!(parse_square("j9"), Err(Error::InvalidSquare(_))));
        assert!(matches!(parse_square(""), Err(Error::InvalidSquare(_))));
    }
}
