use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::golf::FAILED_GUESSES;

static SHARE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)wordle\s+(\d{1,3}(?:[,.]\d{3})+|\d+)\s+([1-6x])/6")
        .expect("share line pattern is valid")
});

static KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)wordle").expect("keyword pattern is valid"));

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)wordle\s+(\S+)").expect("number token pattern is valid"));

static PUZZLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:[,.]\d{3})+|\d+)$").expect("puzzle number pattern is valid")
});

/// A result read from share text, not yet tied to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedShare {
    pub puzzle_number: u64,
    pub guesses: u8,
    pub date: NaiveDate,
}

/// Parse pasted share text, stamping it with today's UTC date.
pub fn parse_share_text(text: &str) -> Result<ParsedShare, ParseError> {
    parse_share_text_on(text, Utc::now().date_naive())
}

/// Parse pasted share text. Only the first line is read; the emoji grid
/// that follows it is ignored.
pub fn parse_share_text_on(text: &str, date: NaiveDate) -> Result<ParsedShare, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let first_line = trimmed.lines().next().unwrap_or_default();

    let Some(caps) = SHARE_LINE.captures(first_line) else {
        return Err(diagnose(first_line));
    };

    let puzzle_number = parse_puzzle_number(&caps[1])?;
    let guesses = match &caps[2] {
        "x" | "X" => FAILED_GUESSES,
        digit => digit.parse::<u8>().map_err(|_| ParseError::InvalidResult)?,
    };

    Ok(ParsedShare {
        puzzle_number,
        guesses,
        date,
    })
}

fn parse_puzzle_number(raw: &str) -> Result<u64, ParseError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::MalformedPuzzleNumber(raw.to_string())),
    }
}

/// Work out which part of a non-matching line is wrong.
fn diagnose(line: &str) -> ParseError {
    if !KEYWORD.is_match(line) {
        return ParseError::MissingKeyword;
    }
    match NUMBER_TOKEN.captures(line) {
        Some(caps) if PUZZLE_NUMBER.is_match(&caps[1]) => ParseError::InvalidResult,
        Some(caps) => ParseError::MalformedPuzzleNumber(caps[1].to_string()),
        None => ParseError::MalformedPuzzleNumber(String::new()),
    }
}
