use tracing::{info, warn};
use wordle_golf_core::share::{self, ParsedShare};
use wordle_golf_core::{
    build_scorecard, rank_players, AddScoreRequest, LeaderboardEntry, PlayerStatistics,
    RemoteSyncError, ScoreRecord, Scorecard, Snapshot, SubmitError,
};

use crate::net::ScoreStore;

/// Owns the snapshot for one local player. Every view is recomputed from the
/// snapshot on request.
///
/// Store calls take `&mut self`, so an append and the reload that follows it
/// can never interleave with another reload.
pub struct Tracker<S> {
    store: S,
    player_name: String,
    snapshot: Snapshot,
    stale: bool,
}

impl<S: ScoreStore> Tracker<S> {
    pub fn new(store: S, player_name: impl Into<String>) -> Self {
        Self {
            store,
            player_name: player_name.into(),
            snapshot: Snapshot::default(),
            stale: false,
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the last reload failed and the snapshot predates it.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Fetch every record and replace the snapshot. On failure the previous
    /// snapshot is kept as it was.
    pub async fn reload(&mut self) -> Result<usize, RemoteSyncError> {
        match self.store.fetch_all().await {
            Ok(records) => {
                self.snapshot = Snapshot::new(records);
                self.stale = false;
                info!(records = self.snapshot.len(), "snapshot reloaded");
                Ok(self.snapshot.len())
            }
            Err(e) => {
                self.stale = true;
                warn!(error = %e, "reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Parse pasted share text and submit it for the local player.
    pub async fn submit(&mut self, text: &str) -> Result<ScoreRecord, SubmitError> {
        let share = share::parse_share_text(text)?;
        self.submit_share(share).await
    }

    /// Check the result against the snapshot, append it, then reload.
    ///
    /// Parse and duplicate failures never reach the store. If the append
    /// succeeds but the reload after it fails, the record is still returned
    /// and the tracker is marked stale.
    pub async fn submit_share(&mut self, share: ParsedShare) -> Result<ScoreRecord, SubmitError> {
        self.snapshot
            .check_duplicate(&self.player_name, share.puzzle_number)?;

        let record = ScoreRecord::from_share(share, &self.player_name);
        self.store.append(&AddScoreRequest::add(&record)).await?;
        info!(
            player = %record.player_name,
            puzzle = record.puzzle_number,
            guesses = record.guesses,
            "score added"
        );

        // Errors are logged by reload and reflected in `is_stale`.
        let _ = self.reload().await;
        Ok(record)
    }

    pub fn stats_for(&self, player_name: &str) -> PlayerStatistics {
        PlayerStatistics::from_records(self.snapshot.history(player_name))
    }

    pub fn my_stats(&self) -> PlayerStatistics {
        self.stats_for(&self.player_name)
    }

    /// The local player's records, newest puzzle first.
    pub fn my_history(&self) -> Vec<&ScoreRecord> {
        let mut history = self.snapshot.history(&self.player_name);
        history.reverse();
        history
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        rank_players(&self.snapshot)
    }

    pub fn scorecard(&self) -> Scorecard {
        build_scorecard(&self.snapshot)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::MemoryStore;
    use super::*;
    use chrono::NaiveDate;
    use wordle_golf_core::{DuplicateEntryError, ParseError};

    fn record(player: &str, puzzle_number: u64, guesses: u8) -> ScoreRecord {
        ScoreRecord {
            puzzle_number,
            guesses,
            date: NaiveDate::from_ymd_opt(2024, 3, 9),
            player_name: player.to_string(),
        }
    }

    async fn loaded(records: Vec<ScoreRecord>) -> Tracker<MemoryStore> {
        let mut tracker = Tracker::new(MemoryStore::with_records(records), "Birckhead");
        tracker.reload().await.unwrap();
        tracker
    }

    #[tokio::test]
    async fn submit_appends_then_reloads() {
        let mut tracker = loaded(vec![record("Ana", 1233, 3)]).await;
        assert_eq!(tracker.store().fetches(), 1);

        let added = tracker.submit("Wordle 1,234 4/6\n🟩🟩🟩🟩🟩").await.unwrap();
        assert_eq!(added.puzzle_number, 1234);
        assert_eq!(added.guesses, 4);
        assert_eq!(added.player_name, "Birckhead");

        assert_eq!(tracker.store().appends(), 1);
        assert_eq!(tracker.store().fetches(), 2);
        assert_eq!(tracker.snapshot().len(), 2);
        assert!(tracker.snapshot().contains("Birckhead", 1234));
        assert!(!tracker.is_stale());
    }

    #[tokio::test]
    async fn duplicate_never_reaches_the_store() {
        let mut tracker = loaded(vec![record("Birckhead", 987, 5)]).await;

        let err = tracker.submit("Wordle 987 X/6").await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Duplicate(DuplicateEntryError {
                player_name: "Birckhead".to_string(),
                puzzle_number: 987,
            })
        );
        assert_eq!(tracker.store().appends(), 0);
        assert_eq!(tracker.store().fetches(), 1);
    }

    #[tokio::test]
    async fn another_players_score_is_not_a_duplicate() {
        let mut tracker = loaded(vec![record("Ana", 987, 5)]).await;
        tracker.submit("Wordle 987 X/6").await.unwrap();
        assert_eq!(tracker.store().appends(), 1);
    }

    #[tokio::test]
    async fn parse_errors_never_reach_the_store() {
        let mut tracker = loaded(vec![]).await;

        let err = tracker.submit("").await.unwrap_err();
        assert_eq!(err, SubmitError::Parse(ParseError::Empty));
        let err = tracker.submit("I solved it!").await.unwrap_err();
        assert_eq!(err, SubmitError::Parse(ParseError::MissingKeyword));

        assert_eq!(tracker.store().appends(), 0);
        assert_eq!(tracker.store().fetches(), 1);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_snapshot() {
        let mut tracker = loaded(vec![record("Ana", 1, 3)]).await;
        *tracker.store().fail_fetch.lock().unwrap() = true;

        let err = tracker.reload().await.unwrap_err();
        assert!(matches!(err, RemoteSyncError::Fetch(_)));
        assert_eq!(tracker.snapshot().len(), 1);
        assert!(tracker.is_stale());
    }

    #[tokio::test]
    async fn failed_append_is_a_remote_error() {
        let mut tracker = loaded(vec![]).await;
        *tracker.store().fail_append.lock().unwrap() = true;

        let err = tracker.submit("Wordle 1000 3/6").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Remote(RemoteSyncError::Append(_))
        ));
        assert_eq!(tracker.store().fetches(), 1);
        assert!(tracker.snapshot().is_empty());
    }

    #[tokio::test]
    async fn unconfirmed_append_is_rejected() {
        let mut tracker = loaded(vec![]).await;
        *tracker.store().reject_append.lock().unwrap() = true;

        let err = tracker.submit("Wordle 1000 3/6").await.unwrap_err();
        assert_eq!(err, SubmitError::Remote(RemoteSyncError::Rejected));
    }

    #[tokio::test]
    async fn saved_score_survives_a_failed_reload() {
        let mut tracker = loaded(vec![]).await;
        *tracker.store().fail_fetch.lock().unwrap() = true;

        let added = tracker.submit("Wordle 1000 3/6").await.unwrap();
        assert_eq!(added.puzzle_number, 1000);
        assert!(tracker.is_stale());
        assert!(tracker.snapshot().is_empty());
    }

    #[tokio::test]
    async fn views_are_scoped_to_the_local_player() {
        let tracker = loaded(vec![
            record("Birckhead", 10, 3),
            record("Ana", 10, 1),
            record("Birckhead", 12, 7),
            record("Birckhead", 11, 4),
        ])
        .await;

        let history: Vec<u64> = tracker.my_history().iter().map(|r| r.puzzle_number).collect();
        assert_eq!(history, vec![12, 11, 10]);

        let stats = tracker.my_stats();
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.total_strokes, -1 + 0 + 4);
        assert_eq!(stats.current_streak, 0);

        let board = tracker.leaderboard();
        assert_eq!(board[0].player_name, "Ana");
        assert_eq!(board[1].player_name, "Birckhead");

        let card = tracker.scorecard();
        assert_eq!(card.puzzles, vec![10, 11, 12]);
        assert_eq!(card.rows.len(), 2);
    }
}
