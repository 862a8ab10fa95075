use serde::{Deserialize, Serialize};

use crate::golf::{self, FAILED_GUESSES};
use crate::record::ScoreRecord;

/// Aggregates over one player's history. Always recomputed from the full
/// record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Whole percent, 0 when no games were played.
    pub win_rate: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Mean guesses over wins only, two decimals. 0 when there are no wins.
    pub avg_guesses: f64,
    /// Index 0..=5 for 1..=6 guesses, index 6 for misses.
    pub guess_distribution: [u32; 7],
    pub total_strokes: i32,
}

impl PlayerStatistics {
    /// Compute statistics from records already ordered oldest to newest.
    /// The order is trusted as given; streaks depend on it.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoreRecord>,
    {
        let guesses: Vec<u8> = records.into_iter().map(|r| r.guesses).collect();
        Self::from_guesses(&guesses)
    }

    /// Compute statistics from a chronological sequence of guess counts.
    pub fn from_guesses(guesses: &[u8]) -> Self {
        let is_win = |g: &u8| *g < FAILED_GUESSES;

        let wins = guesses.iter().filter(|g| is_win(*g)).count() as u32;
        let losses = guesses.iter().filter(|g| **g == FAILED_GUESSES).count() as u32;
        let total_games = wins + losses;

        let win_rate = if total_games == 0 {
            0
        } else {
            (100.0 * wins as f64 / total_games as f64).round() as u32
        };

        let mut guess_distribution = [0u32; 7];
        for g in guesses {
            if (1..=FAILED_GUESSES).contains(g) {
                guess_distribution[(*g - 1) as usize] += 1;
            }
        }

        let current_streak = guesses.iter().rev().take_while(|g| is_win(*g)).count() as u32;

        let mut max_streak = 0u32;
        let mut run = 0u32;
        for g in guesses {
            if is_win(g) {
                run += 1;
                max_streak = max_streak.max(run);
            } else {
                run = 0;
            }
        }

        let avg_guesses = if wins == 0 {
            0.0
        } else {
            let won: u32 = guesses.iter().filter(|g| is_win(*g)).map(|g| *g as u32).sum();
            round_to_hundredths(won as f64 / wins as f64)
        };

        let total_strokes = guesses.iter().map(|g| golf::strokes_for(*g)).sum();

        Self {
            total_games,
            wins,
            losses,
            win_rate,
            current_streak,
            max_streak,
            avg_guesses,
            guess_distribution,
            total_strokes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_games == 0
    }

    /// Each distribution bucket as a percentage of the largest one.
    pub fn distribution_percentages(&self) -> [u32; 7] {
        let max = self.guess_distribution.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return [0; 7];
        }
        self.guess_distribution
            .map(|count| (100.0 * count as f64 / max as f64).round() as u32)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
