use std::time::Duration;

use tracing::{debug, warn};
use wordle_golf_core::protocol::{self, AddScoreRequest, AddScoreResponse};
use wordle_golf_core::{RemoteSyncError, ScoreRecord};

use super::ScoreStore;

/// Score store reached over HTTP: `GET` the URL for every record, `POST` an
/// add action to the same URL to append one.
#[derive(Debug, Clone)]
pub struct HttpScoreStore {
    client: reqwest::Client,
    url: String,
}

impl HttpScoreStore {
    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "could not reach the score store".to_string()
    } else if let Some(status) = e.status() {
        format!("score store answered {}", status)
    } else {
        e.to_string()
    }
}

impl ScoreStore for HttpScoreStore {
    async fn fetch_all(&self) -> Result<Vec<ScoreRecord>, RemoteSyncError> {
        let fetch_err = |e: reqwest::Error| RemoteSyncError::Fetch(describe(&e));

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?;
        let body = resp.text().await.map_err(fetch_err)?;

        let records = protocol::decode_rows(&body)
            .map_err(|e| RemoteSyncError::Fetch(format!("unexpected response: {}", e)))?;
        debug!(count = records.len(), url = %self.url, "fetched scores");
        Ok(records)
    }

    async fn append(&self, request: &AddScoreRequest) -> Result<(), RemoteSyncError> {
        let append_err = |e: reqwest::Error| RemoteSyncError::Append(describe(&e));

        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(append_err)?
            .error_for_status()
            .map_err(append_err)?;
        let body = resp.json::<AddScoreResponse>().await.map_err(append_err)?;

        if body.success {
            debug!(puzzle = request.puzzle_number, "score appended");
            Ok(())
        } else {
            warn!(
                puzzle = request.puzzle_number,
                error = body.error.as_deref().unwrap_or("none"),
                "store did not confirm append"
            );
            Err(RemoteSyncError::Rejected)
        }
    }
}
