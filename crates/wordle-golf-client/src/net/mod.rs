pub mod client;

pub use client::HttpScoreStore;

use wordle_golf_core::{AddScoreRequest, RemoteSyncError, ScoreRecord};

/// The remote store that owns every record. Fetches return the whole
/// collection; appends add one record.
#[allow(async_fn_in_trait)]
pub trait ScoreStore {
    async fn fetch_all(&self) -> Result<Vec<ScoreRecord>, RemoteSyncError>;

    async fn append(&self, request: &AddScoreRequest) -> Result<(), RemoteSyncError>;
}
