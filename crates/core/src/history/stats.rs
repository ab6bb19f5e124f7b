//! Aggregate statistics for the history and dashboard pages

use serde::Serialize;

use super::records::{GameRecord, GameResult};

#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryStats {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Rounded percentage; 0 when there are no games.
    pub win_rate: u32,
}

impl HistoryStats {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut stats = HistoryStats::default();
        for game in games {
            stats.total += 1;
            match game.result {
                GameResult::Win => stats.wins += 1,
                GameResult::Loss => stats.losses += 1,
                GameResult::Draw => stats.draws += 1,
            }
        }
        if stats.total > 0 {
            stats.win_rate =
                ((stats.wins as f32 / stats.total as f32) * 100.0).round() as u32;
        }
        stats
    }
}
