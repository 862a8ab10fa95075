pub mod error;
pub mod golf;
pub mod leaderboard;
pub mod protocol;
pub mod record;
pub mod scorecard;
pub mod share;
pub mod stats;

pub use error::{DuplicateEntryError, ParseError, RemoteSyncError, SubmitError};
pub use golf::{format_strokes, strokes_for, term_for, GolfTerm};
pub use leaderboard::{rank_players, LeaderboardEntry, RankTier};
pub use protocol::{AddScoreRequest, AddScoreResponse};
pub use record::{ScoreRecord, Snapshot};
pub use scorecard::{build_scorecard, Scorecard, ScorecardCell, ScorecardRow};
pub use share::{parse_share_text, ParsedShare};
pub use stats::PlayerStatistics;
