//! Game history records with client-side selection
//!
//! Rows are placeholder data until the game-log device is wired up; the
//! filter and sort semantics match what the history page exposes.

use serde::{Deserialize, Serialize};
use shakmaty::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::Win => "win",
            GameResult::Loss => "loss",
            GameResult::Draw => "draw",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GameResult::Win => "✓",
            GameResult::Loss => "✗",
            GameResult::Draw => "=",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub id: String,
    /// ISO-8601 date; sorts lexicographically.
    pub date: String,
    pub opponent: String,
    pub result: GameResult,
    pub player_color: Color,
    pub moves: u16,
    pub time_control: String,
    pub opening: String,
    pub rating: u16,
    pub opponent_rating: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFilter {
    #[default]
    All,
    Win,
    Loss,
    Draw,
}

impl ResultFilter {
    /// Query-string form; anything unrecognized means no filtering.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => ResultFilter::Win,
            "loss" => ResultFilter::Loss,
            "draw" => ResultFilter::Draw,
            _ => ResultFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFilter::All => "all",
            ResultFilter::Win => "win",
            ResultFilter::Loss => "loss",
            ResultFilter::Draw => "draw",
        }
    }

    pub fn matches(&self, result: GameResult) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Win => result == GameResult::Win,
            ResultFilter::Loss => result == GameResult::Loss,
            ResultFilter::Draw => result == GameResult::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Rating,
    Moves,
}

impl SortKey {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => SortKey::Rating,
            "moves" => SortKey::Moves,
            _ => SortKey::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Rating => "rating",
            SortKey::Moves => "moves",
        }
    }
}

/// Filtered rows, newest/highest first.
pub fn select(games: &[GameRecord], filter: ResultFilter, sort: SortKey) -> Vec<GameRecord> {
    let mut rows: Vec<GameRecord> = games
        .iter()
        .filter(|g| filter.matches(g.result))
        .cloned()
        .collect();
    match sort {
        SortKey::Date => rows.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Rating => rows.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Moves => rows.sort_by(|a, b| b.moves.cmp(&a.moves)),
    }
    rows
}

/// Placeholder rows shown until a device sync exists.
pub fn sample_games() -> Vec<GameRecord> {
    vec![
        GameRecord {
            id: "1".to_string(),
            date: "2024-01-15".to_string(),
            opponent: "ChessMaster2000".to_string(),
            result: GameResult::Win,
            player_color: Color::White,
            moves: 32,
            time_control: "10+0".to_string(),
            opening: "Sicilian Defense".to_string(),
            rating: 1547,
            opponent_rating: 1523,
        },
        GameRecord {
            id: "2".to_string(),
            date: "2024-01-14".to_string(),
            opponent: "KnightRider".to_string(),
            result: GameResult::Loss,
            player_color: Color::Black,
            moves: 28,
            time_control: "15+10".to_string(),
            opening: "Queen's Gambit".to_string(),
            rating: 1535,
            opponent_rating: 1598,
        },
        GameRecord {
            id: "3".to_string(),
            date: "2024-01-14".to_string(),
            opponent: "PawnStorm".to_string(),
            result: GameResult::Draw,
            player_color: Color::White,
            moves: 45,
            time_control: "5+3".to_string(),
            opening: "English Opening".to_string(),
            rating: 1540,
            opponent_rating: 1542,
        },
        GameRecord {
            id: "4".to_string(),
            date: "2024-01-13".to_string(),
            opponent: "RookiePlayer".to_string(),
            result: GameResult::Win,
            player_color: Color::Black,
            moves: 24,
            time_control: "10+0".to_string(),
            opening: "French Defense".to_string(),
            rating: 1532,
            opponent_rating: 1489,
        },
        GameRecord {
            id: "5".to_string(),
            date: "2024-01-12".to_string(),
            opponent: "BishopBlitz".to_string(),
            result: GameResult::Win,
            player_color: Color::White,
            moves: 36,
            time_control: "3+2".to_string(),
            opening: "Italian Game".to_string(),
            rating: 1521,
            opponent_rating: 1507,
        },
    ]
}
