use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::golf;
use crate::record::Snapshot;

/// Number of most recent puzzles shown on the card, one per hole.
pub const SCORECARD_HOLES: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScorecardCell {
    /// The player has no score for this puzzle.
    Empty,
    #[serde(rename_all = "camelCase")]
    Played {
        guesses: u8,
        strokes: i32,
        /// Card total after this hole.
        running_total: i32,
    },
}

impl ScorecardCell {
    pub fn strokes(&self) -> Option<i32> {
        match self {
            ScorecardCell::Played { strokes, .. } => Some(*strokes),
            ScorecardCell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScorecardCell::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardRow {
    pub player_name: String,
    /// One cell per column of the card, in column order.
    pub cells: Vec<ScorecardCell>,
    /// Strokes over the card's window only.
    pub total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    /// Puzzle numbers of the columns, ascending.
    pub puzzles: Vec<u64>,
    pub rows: Vec<ScorecardRow>,
}

impl Scorecard {
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

/// Build the card for the most recent puzzles in the snapshot. Rows follow
/// the order in which players first appear.
pub fn build_scorecard(snapshot: &Snapshot) -> Scorecard {
    let all: BTreeSet<u64> = snapshot.records().iter().map(|r| r.puzzle_number).collect();
    let skip = all.len().saturating_sub(SCORECARD_HOLES);
    let puzzles: Vec<u64> = all.into_iter().skip(skip).collect();

    let rows = snapshot
        .players()
        .into_iter()
        .map(|player_name| {
            let mut total = 0;
            let cells = puzzles
                .iter()
                .map(|puzzle| match snapshot.find(player_name, *puzzle) {
                    Some(record) => {
                        let strokes = golf::strokes_for(record.guesses);
                        total += strokes;
                        ScorecardCell::Played {
                            guesses: record.guesses,
                            strokes,
                            running_total: total,
                        }
                    }
                    None => ScorecardCell::Empty,
                })
                .collect();
            ScorecardRow {
                player_name: player_name.to_string(),
                cells,
                total,
            }
        })
        .collect();

    Scorecard { puzzles, rows }
}
