//! Game history: mock records, selection, statistics

mod records;
mod stats;

pub use records::{sample_games, select, GameRecord, GameResult, ResultFilter, SortKey};
pub use stats::HistoryStats;
