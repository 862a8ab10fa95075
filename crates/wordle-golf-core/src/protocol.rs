use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::golf::FAILED_GUESSES;
use crate::record::ScoreRecord;

/// A number as the score store sends it: spreadsheet-backed stores hand
/// back numeric cells as JSON numbers or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// Leading integer of the value, reading text the way `parseInt` does.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            LooseNumber::Int(n) => Some(*n),
            LooseNumber::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            LooseNumber::Float(_) => None,
            LooseNumber::Text(s) => leading_integer(s),
        }
    }

    /// Like [`LooseNumber::to_int`] but covering the whole `u64` range.
    pub fn to_unsigned(&self) -> Option<u64> {
        match self {
            LooseNumber::Int(n) => u64::try_from(*n).ok(),
            LooseNumber::Float(f) if f.is_finite() && *f >= 0.0 => Some(f.trunc() as u64),
            LooseNumber::Float(_) => None,
            LooseNumber::Text(s) => {
                let digits: String = s
                    .trim_start()
                    .trim_start_matches('+')
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse().ok()
            }
        }
    }
}

impl From<u64> for LooseNumber {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => LooseNumber::Int(n),
            Err(_) => LooseNumber::Text(n.to_string()),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// One record as the store returns it from a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub puzzle_number: LooseNumber,
    #[serde(default)]
    pub guesses: Option<LooseNumber>,
    #[serde(default)]
    pub date: Option<String>,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("bad puzzle number {0:?}")]
    PuzzleNumber(String),
    #[error("missing player name")]
    PlayerName,
}

impl ScoreRow {
    /// Only the puzzle number and player name are required. A row that has
    /// both is kept so it still counts for duplicate checks; an unreadable
    /// guess count becomes 0 (no golf term, 0 strokes) and an unreadable date
    /// becomes `None`.
    pub fn into_record(self) -> Result<ScoreRecord, RowError> {
        let puzzle_number = self
            .puzzle_number
            .to_unsigned()
            .filter(|n| *n > 0)
            .ok_or_else(|| RowError::PuzzleNumber(format!("{:?}", self.puzzle_number)))?;

        let player_name = self.player_name.trim().to_string();
        if player_name.is_empty() {
            return Err(RowError::PlayerName);
        }

        let guesses = match self.guesses.as_ref().and_then(LooseNumber::to_int) {
            Some(n) => u8::try_from(n).unwrap_or(0),
            None => 0,
        };
        if !(1..=FAILED_GUESSES).contains(&guesses) {
            warn!(
                player = %player_name,
                puzzle = puzzle_number,
                raw = ?self.guesses,
                "guess count has no golf term, scoring 0"
            );
        }

        let date = self.date.as_deref().and_then(parse_date);
        if date.is_none() {
            warn!(player = %player_name, puzzle = puzzle_number, raw = ?self.date, "unreadable date");
        }

        Ok(ScoreRecord {
            puzzle_number,
            guesses,
            date,
            player_name,
        })
    }
}

impl From<&ScoreRecord> for ScoreRow {
    fn from(record: &ScoreRecord) -> Self {
        Self {
            puzzle_number: LooseNumber::from(record.puzzle_number),
            guesses: Some(LooseNumber::Int(i64::from(record.guesses))),
            date: record.date.map(|d| d.to_string()),
            player_name: record.player_name.clone(),
        }
    }
}

/// Accepts `2024-03-09`, a full timestamp such as
/// `2024-03-09T05:00:00.000Z`, or a JavaScript date string such as
/// `Sat Mar 09 2024 00:00:00 GMT-0500`.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .or_else(|| {
            raw.get(..15)
                .and_then(|day| NaiveDate::parse_from_str(day, "%a %b %d %Y").ok())
        })
}

/// Decode a fetch response body. Rows that cannot be read are logged and
/// left out; only a body that is not a JSON array fails.
pub fn decode_rows(body: &str) -> Result<Vec<ScoreRecord>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let row = match serde_json::from_value::<ScoreRow>(value) {
            Ok(row) => row,
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable score row");
                continue;
            }
        };
        match row.into_record() {
            Ok(record) => records.push(record),
            Err(e) => warn!(index, error = %e, "skipping invalid score row"),
        }
    }
    Ok(records)
}

/// Body of an append call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddScoreRequest {
    pub action: String,
    pub puzzle_number: u64,
    pub guesses: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub player_name: String,
}

impl AddScoreRequest {
    pub const ACTION: &'static str = "add";

    pub fn add(record: &ScoreRecord) -> Self {
        Self {
            action: Self::ACTION.to_string(),
            puzzle_number: record.puzzle_number,
            guesses: record.guesses,
            date: record.date,
            player_name: record.player_name.clone(),
        }
    }
}

/// Reply to an append call. Anything but `success: true` is a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddScoreResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
