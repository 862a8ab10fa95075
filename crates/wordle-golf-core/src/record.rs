use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DuplicateEntryError;
use crate::golf::{self, FAILED_GUESSES};
use crate::share::ParsedShare;

/// One completed puzzle attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub puzzle_number: u64,
    /// 1..=6 for a solve, 7 for a miss.
    pub guesses: u8,
    /// Day the result was recorded. `None` when the store's date cell could
    /// not be read; the record still counts everywhere else.
    pub date: Option<NaiveDate>,
    pub player_name: String,
}

impl ScoreRecord {
    pub fn from_share(share: ParsedShare, player_name: &str) -> Self {
        Self {
            puzzle_number: share.puzzle_number,
            guesses: share.guesses,
            date: Some(share.date),
            player_name: player_name.to_string(),
        }
    }

    /// Any result short of a miss, including guess counts that map to no
    /// golf term.
    pub fn is_win(&self) -> bool {
        self.guesses < FAILED_GUESSES
    }

    pub fn is_loss(&self) -> bool {
        self.guesses == FAILED_GUESSES
    }

    pub fn strokes(&self) -> i32 {
        golf::strokes_for(self.guesses)
    }

    pub fn result_label(&self) -> String {
        golf::result_label(self.guesses)
    }
}

/// Every record known at the last successful fetch. Replaced wholesale on
/// reload, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    records: Vec<ScoreRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct player names in the order they first appear.
    pub fn players(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.player_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// A player's records, oldest puzzle first.
    pub fn history(&self, player_name: &str) -> Vec<&ScoreRecord> {
        let mut records: Vec<&ScoreRecord> = self
            .records
            .iter()
            .filter(|r| r.player_name == player_name)
            .collect();
        records.sort_by_key(|r| r.puzzle_number);
        records
    }

    /// First record for a player and puzzle, if any.
    pub fn find(&self, player_name: &str, puzzle_number: u64) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .find(|r| r.player_name == player_name && r.puzzle_number == puzzle_number)
    }

    pub fn contains(&self, player_name: &str, puzzle_number: u64) -> bool {
        self.find(player_name, puzzle_number).is_some()
    }

    /// Reject a second score for the same player and puzzle.
    pub fn check_duplicate(
        &self,
        player_name: &str,
        puzzle_number: u64,
    ) -> Result<(), DuplicateEntryError> {
        if self.contains(player_name, puzzle_number) {
            return Err(DuplicateEntryError {
                player_name: player_name.to_string(),
                puzzle_number,
            });
        }
        Ok(())
    }
}

impl From<Vec<ScoreRecord>> for Snapshot {
    fn from(records: Vec<ScoreRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(player: &str, puzzle_number: u64, guesses: u8) -> ScoreRecord {
        ScoreRecord {
            puzzle_number,
            guesses,
            date: Some(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(puzzle_number % 365),
            ),
            player_name: player.to_string(),
        }
    }

    /// Records for one player over consecutive puzzles starting at 1.
    pub fn run(player: &str, guesses: &[u8]) -> Vec<ScoreRecord> {
        guesses
            .iter()
            .enumerate()
            .map(|(i, g)| record(player, i as u64 + 1, *g))
            .collect()
    }
}
