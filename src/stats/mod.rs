//! Cumulative win/draw counters and where they are kept between sessions.

mod store;

pub use store::{FileStatsStore, MemoryStatsStore, StatsStore, UnavailableStatsStore};

use serde::{Deserialize, Serialize};

use crate::game::{GameOutcome, Player};

/// Record name the counters are stored under.
pub const DEFAULT_KEY: &str = "winStats";

/// Wins per colour and draws, persisted as
/// `{"redWins": n, "yellowWins": n, "draws": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinStats {
    pub red_wins: u64,
    pub yellow_wins: u64,
    pub draws: u64,
}

impl WinStats {
    /// Count one finished game
    pub fn record(&mut self, outcome: GameOutcome) {
        let counter = match outcome {
            GameOutcome::Winner(Player::Red) => &mut self.red_wins,
            GameOutcome::Winner(Player::Yellow) => &mut self.yellow_wins,
            GameOutcome::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn wins(&self, player: Player) -> u64 {
        match player {
            Player::Red => self.red_wins,
            Player::Yellow => self.yellow_wins,
        }
    }

    pub fn games(&self) -> u64 {
        self.red_wins
            .saturating_add(self.yellow_wins)
            .saturating_add(self.draws)
    }
}
