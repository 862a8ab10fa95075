use thiserror::Error;

/// Why a pasted share text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Nothing to add. Paste your Wordle share text first")]
    Empty,
    #[error("Invalid Wordle share format: expected a line like \"Wordle 1,234 4/6\"")]
    MissingKeyword,
    #[error("Invalid Wordle share format: bad puzzle number `{0}`")]
    MalformedPuzzleNumber(String),
    #[error("Invalid Wordle share format: result must be 1/6 to 6/6 or X/6")]
    InvalidResult,
}

/// A score for this player and puzzle is already in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("You already added puzzle {puzzle_number}!")]
pub struct DuplicateEntryError {
    pub player_name: String,
    pub puzzle_number: u64,
}

/// Fetching from or appending to the remote score store failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteSyncError {
    #[error("Failed to load scores: {0}")]
    Fetch(String),
    #[error("Failed to save score: {0}")]
    Append(String),
    #[error("Failed to save score: the store did not confirm the write")]
    Rejected,
}

/// Everything that can stop a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Duplicate(#[from] DuplicateEntryError),
    #[error(transparent)]
    Remote(#[from] RemoteSyncError),
}
