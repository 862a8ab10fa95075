use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use wordle_golf_client::app::{execute, Command};
use wordle_golf_client::{HttpScoreStore, ScoreStore, Tracker};
use wordle_golf_core::{DuplicateEntryError, RemoteSyncError, SubmitError};

/// Rows kept the way a spreadsheet-backed store hands them back: numbers as
/// text and dates as timestamps.
#[derive(Clone, Default)]
struct Sheet {
    rows: Arc<Mutex<Vec<Value>>>,
    /// When set, reads answer 500 while appends keep working.
    fail_reads: Arc<AtomicBool>,
}

async fn list_rows(State(sheet): State<Sheet>) -> Result<Json<Vec<Value>>, StatusCode> {
    if sheet.fail_reads.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(sheet.rows.lock().unwrap().clone()))
}

async fn add_row(State(sheet): State<Sheet>, Json(req): Json<Value>) -> Json<Value> {
    if req["action"] != "add" {
        return Json(json!({ "success": false, "error": "unknown action" }));
    }
    sheet.rows.lock().unwrap().push(json!({
        "puzzleNumber": req["puzzleNumber"].to_string(),
        "guesses": req["guesses"].to_string(),
        "date": format!("{}T05:00:00.000Z", req["date"].as_str().unwrap_or_default()),
        "playerName": req["playerName"],
    }));
    Json(json!({ "success": true }))
}

/// Spin up a fake store on a random port, return the base URL and its rows.
async fn start_store(seed: Vec<Value>) -> (String, Sheet) {
    let sheet = Sheet {
        rows: Arc::new(Mutex::new(seed)),
        fail_reads: Arc::default(),
    };
    let app = Router::new()
        .route("/scores", get(list_rows).post(add_row))
        .route(
            "/broken",
            get(|| async { Json(json!({ "error": "quota exceeded" })) })
                .post(|| async { Json(json!({ "success": false, "error": "sheet locked" })) }),
        )
        .with_state(sheet.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://127.0.0.1:{}", port), sheet)
}

fn store(url: String) -> HttpScoreStore {
    HttpScoreStore::new(url, Duration::from_secs(5)).unwrap()
}

fn seed() -> Vec<Value> {
    vec![
        json!({ "puzzleNumber": 1232, "guesses": 3, "date": "2024-03-07", "playerName": "Ana" }),
        json!({ "puzzleNumber": "1233", "guesses": "2", "date": "2024-03-08T05:00:00.000Z", "playerName": "Ana" }),
        json!({ "puzzleNumber": "1233", "guesses": "6", "date": "2024-03-08", "playerName": "Birckhead" }),
        json!({ "puzzleNumber": "oops", "guesses": "6", "date": "2024-03-08", "playerName": "Cole" }),
    ]
}

#[tokio::test]
async fn submit_reaches_the_store_and_comes_back() {
    let (base, sheet) = start_store(seed()).await;
    let mut tracker = Tracker::new(store(format!("{}/scores", base)), "Birckhead");

    assert_eq!(tracker.reload().await.unwrap(), 3);

    let added = tracker
        .submit("Wordle 1,234 4/6\n\n⬛🟨⬛⬛⬛\n🟩🟩🟩🟩🟩")
        .await
        .unwrap();
    assert_eq!(added.puzzle_number, 1234);
    assert_eq!(sheet.rows.lock().unwrap().len(), 5);

    assert!(!tracker.is_stale());
    assert_eq!(tracker.snapshot().len(), 4);
    let stored = tracker.snapshot().find("Birckhead", 1234).unwrap();
    assert_eq!(stored.guesses, 4);
    assert_eq!(stored.date, added.date);

    let board = tracker.leaderboard();
    let names: Vec<&str> = board.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Birckhead"]);
    assert_eq!(board[0].total_strokes, -3);
    assert_eq!(board[1].total_strokes, 1);
}

#[tokio::test]
async fn duplicate_is_caught_before_posting() {
    let (base, sheet) = start_store(seed()).await;
    let mut tracker = Tracker::new(store(format!("{}/scores", base)), "Birckhead");
    tracker.reload().await.unwrap();

    let err = tracker.submit("Wordle 1233 3/6").await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::Duplicate(DuplicateEntryError {
            player_name: "Birckhead".to_string(),
            puzzle_number: 1233,
        })
    );
    assert_eq!(sheet.rows.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn store_failures_surface_as_sync_errors() {
    let (base, _sheet) = start_store(vec![]).await;

    let broken = store(format!("{}/broken", base));
    assert!(matches!(
        broken.fetch_all().await,
        Err(RemoteSyncError::Fetch(_))
    ));

    let mut tracker = Tracker::new(broken, "Birckhead");
    let err = tracker.submit("Wordle 1000 3/6").await.unwrap_err();
    assert_eq!(err, SubmitError::Remote(RemoteSyncError::Rejected));

    let missing = store(format!("{}/nowhere", base));
    match missing.fetch_all().await {
        Err(RemoteSyncError::Fetch(msg)) => assert!(msg.contains("404"), "{}", msg),
        other => panic!("Expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_reload_keeps_the_last_snapshot() {
    let (base, sheet) = start_store(seed()).await;
    let mut tracker = Tracker::new(store(format!("{}/scores", base)), "Birckhead");
    tracker.reload().await.unwrap();

    sheet.fail_reads.store(true, Ordering::SeqCst);
    match tracker.reload().await {
        Err(RemoteSyncError::Fetch(msg)) => assert!(msg.contains("500"), "{}", msg),
        other => panic!("Expected fetch error, got {:?}", other),
    }
    assert!(tracker.is_stale());
    assert_eq!(tracker.snapshot().len(), 3);

    // The append lands even though the refresh after it fails.
    let added = tracker.submit("Wordle 1240 2/6").await.unwrap();
    assert_eq!(added.puzzle_number, 1240);
    assert_eq!(sheet.rows.lock().unwrap().len(), 5);
    assert!(tracker.is_stale());
    assert!(!tracker.snapshot().contains("Birckhead", 1240));

    sheet.fail_reads.store(false, Ordering::SeqCst);
    assert_eq!(tracker.reload().await.unwrap(), 4);
    assert!(!tracker.is_stale());
    assert!(tracker.snapshot().contains("Birckhead", 1240));
}

#[tokio::test]
async fn commands_render_from_a_live_store() {
    let (base, _sheet) = start_store(seed()).await;
    let mut tracker = Tracker::new(store(format!("{}/scores", base)), "Birckhead");

    let out = execute(&mut tracker, Command::Leaderboard).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[3].contains("Ana"));
    assert!(lines[4].contains("Birckhead") && lines[4].ends_with(" *"));

    let out = execute(
        &mut tracker,
        Command::Add {
            text: Some("Wordle 1234 X/6".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(out.starts_with("Added Wordle 1234: X/6, No Submission (+4)\n"));
}
