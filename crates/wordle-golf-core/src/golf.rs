use serde::{Deserialize, Serialize};

/// Guess count recorded for a puzzle that was not solved in six tries.
pub const FAILED_GUESSES: u8 = 7;

/// Strokes for a result. Guess counts outside 1..=7 score 0.
pub fn strokes_for(guesses: u8) -> i32 {
    match GolfTerm::from_guesses(guesses) {
        Some(term) => term.strokes(),
        None => 0,
    }
}

/// Golf name for a result, "Unknown" outside 1..=7.
pub fn term_for(guesses: u8) -> &'static str {
    match GolfTerm::from_guesses(guesses) {
        Some(term) => term.label(),
        None => "Unknown",
    }
}

/// Share-style result, `4/6` or `X/6` for a miss.
pub fn result_label(guesses: u8) -> String {
    if guesses == FAILED_GUESSES {
        "X/6".to_string()
    } else {
        format!("{}/6", guesses)
    }
}

/// Render a stroke count with an explicit sign for anything over par.
pub fn format_strokes(strokes: i32) -> String {
    if strokes > 0 {
        format!("+{}", strokes)
    } else {
        strokes.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GolfTerm {
    HoleInOne,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    NoSubmission,
}

impl GolfTerm {
    pub fn from_guesses(guesses: u8) -> Option<GolfTerm> {
        match guesses {
            1 => Some(GolfTerm::HoleInOne),
            2 => Some(GolfTerm::Eagle),
            3 => Some(GolfTerm::Birdie),
            4 => Some(GolfTerm::Par),
            5 => Some(GolfTerm::Bogey),
            6 => Some(GolfTerm::DoubleBogey),
            FAILED_GUESSES => Some(GolfTerm::NoSubmission),
            _ => None,
        }
    }

    pub fn guesses(&self) -> u8 {
        match self {
            GolfTerm::HoleInOne => 1,
            GolfTerm::Eagle => 2,
            GolfTerm::Birdie => 3,
            GolfTerm::Par => 4,
            GolfTerm::Bogey => 5,
            GolfTerm::DoubleBogey => 6,
            GolfTerm::NoSubmission => FAILED_GUESSES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GolfTerm::HoleInOne => "Hole in One",
            GolfTerm::Eagle => "Eagle",
            GolfTerm::Birdie => "Birdie",
            GolfTerm::Par => "Par",
            GolfTerm::Bogey => "Bogey",
            GolfTerm::DoubleBogey => "Double Bogey",
            GolfTerm::NoSubmission => "No Submission",
        }
    }

    pub fn strokes(&self) -> i32 {
        match self {
            GolfTerm::HoleInOne => -3,
            GolfTerm::Eagle => -2,
            GolfTerm::Birdie => -1,
            GolfTerm::Par => 0,
            GolfTerm::Bogey => 1,
            GolfTerm::DoubleBogey => 2,
            // A miss costs more than the worst solve.
            GolfTerm::NoSubmission => 4,
        }
    }

    /// Every term in guess order, for the scoring legend.
    pub fn all() -> &'static [GolfTerm] {
        &[
            GolfTerm::HoleInOne,
            GolfTerm::Eagle,
            GolfTerm::Birdie,
            GolfTerm::Par,
            GolfTerm::Bogey,
            GolfTerm::DoubleBogey,
            GolfTerm::NoSubmission,
        ]
    }
}
