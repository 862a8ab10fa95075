use std::fmt::Write;

use wordle_golf_core::{
    format_strokes, GolfTerm, LeaderboardEntry, PlayerStatistics, RankTier, ScoreRecord,
    Scorecard, ScorecardCell,
};

// ── Constants ────────────────────────────────────────────────────────────────

const NAME_WIDTH: usize = 12;
const CELL_WIDTH: usize = 5;
const BAR_WIDTH: usize = 30;
/// Smallest bar drawn for a distribution bucket, in percent.
const MIN_BAR_PERCENT: u32 = 5;

// ── Legend ───────────────────────────────────────────────────────────────────

pub fn legend() -> String {
    let mut out = String::from("Scoring\n");
    for term in GolfTerm::all() {
        let result = if term.guesses() == wordle_golf_core::golf::FAILED_GUESSES {
            "X".to_string()
        } else {
            format!("{}/6", term.guesses())
        };
        let _ = writeln!(
            out,
            "  {:<14} {:>3}  ({})",
            term.label().to_uppercase(),
            format_strokes(term.strokes()),
            result
        );
    }
    out
}

// ── Leaderboard ──────────────────────────────────────────────────────────────

pub fn leaderboard(entries: &[LeaderboardEntry], me: &str) -> String {
    if entries.is_empty() {
        return "No scores yet. Add your first Wordle result to get started.\n".to_string();
    }

    let mut out = String::from("Leaderboard\n");
    let _ = writeln!(out, "  {:>3}  {:<w$} {:>7}  Holes", "#", "Player", "Strokes", w = NAME_WIDTH);
    let _ = writeln!(out, "  {}", "─".repeat(NAME_WIDTH + 22));
    for entry in entries {
        let marker = match entry.tier() {
            RankTier::Gold => "🥇",
            RankTier::Silver => "🥈",
            RankTier::Bronze => "🥉",
            RankTier::Field => "  ",
        };
        let you = if entry.player_name == me { " *" } else { "" };
        let _ = writeln!(
            out,
            "{}{:>3}  {:<w$} {:>7}  {}{}",
            marker,
            entry.rank,
            truncate(&entry.player_name, NAME_WIDTH),
            format_strokes(entry.total_strokes),
            entry.total_games,
            you,
            w = NAME_WIDTH
        );
    }
    out
}

// ── Scorecard ────────────────────────────────────────────────────────────────

pub fn scorecard(card: &Scorecard, me: &str) -> String {
    if card.is_empty() {
        return "No scores yet. Add your first Wordle result to get started.\n".to_string();
    }

    let mut out = String::new();
    let _ = write!(out, "{:<w$}", "HOLE", w = NAME_WIDTH);
    for hole in 1..=card.puzzles.len() {
        let _ = write!(out, "{:>c$}", hole, c = CELL_WIDTH);
    }
    let _ = writeln!(out, "{:>c$}", "TOT", c = CELL_WIDTH + 1);

    let _ = write!(out, "{:<w$}", "#", w = NAME_WIDTH);
    for puzzle in &card.puzzles {
        let _ = write!(out, "{:>c$}", short_puzzle(*puzzle), c = CELL_WIDTH);
    }
    out.push('\n');

    for row in &card.rows {
        let name = truncate(&row.player_name.to_uppercase(), NAME_WIDTH - 2);
        let name = if row.player_name == me {
            format!("{}*", name)
        } else {
            name
        };
        let _ = write!(out, "{:<w$}", name, w = NAME_WIDTH);
        for cell in &row.cells {
            let text = match cell {
                ScorecardCell::Empty => "-".to_string(),
                ScorecardCell::Played { strokes, .. } => format_strokes(*strokes),
            };
            let _ = write!(out, "{:>c$}", text, c = CELL_WIDTH);
        }
        let _ = writeln!(out, "{:>c$}", format_strokes(row.total), c = CELL_WIDTH + 1);
    }
    out
}

/// Last three digits of a puzzle number so columns stay narrow.
fn short_puzzle(puzzle: u64) -> String {
    if puzzle >= 1000 {
        format!("…{:03}", puzzle % 1000)
    } else {
        puzzle.to_string()
    }
}

// ── Statistics ───────────────────────────────────────────────────────────────

pub fn statistics(player_name: &str, stats: &PlayerStatistics) -> String {
    if stats.is_empty() {
        return format!("No scores for {} yet.\n", player_name);
    }

    let mut out = format!("Statistics for {}\n", player_name);
    let _ = writeln!(out, "  Games played    {}", stats.total_games);
    let _ = writeln!(out, "  Win rate        {}%", stats.win_rate);
    let _ = writeln!(out, "  Current streak  {}", stats.current_streak);
    let _ = writeln!(out, "  Max streak      {}", stats.max_streak);
    let _ = writeln!(out, "  Total strokes   {}", format_strokes(stats.total_strokes));
    let _ = writeln!(out, "  Avg guesses     {:.2}", stats.avg_guesses);
    out.push_str("\nGuess distribution\n");

    let percentages = stats.distribution_percentages();
    for (i, count) in stats.guess_distribution.iter().enumerate() {
        let label = if i == 6 { "X".to_string() } else { (i + 1).to_string() };
        let percent = percentages[i].max(MIN_BAR_PERCENT) as usize;
        let width = (BAR_WIDTH * percent).div_ceil(100);
        let count_text = if *count > 0 { count.to_string() } else { String::new() };
        let _ = writeln!(out, "  {} {} {}", label, "█".repeat(width), count_text);
    }
    out
}

// ── History ──────────────────────────────────────────────────────────────────

/// One line per record, in the order given.
pub fn history(records: &[&ScoreRecord]) -> String {
    if records.is_empty() {
        return "No scores yet. Add your first Wordle result to get started.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let date = match record.date {
            Some(date) => date.to_string(),
            None => "----------".to_string(),
        };
        let _ = writeln!(
            out,
            "Wordle {:<7} {}  {}  ({})",
            record.puzzle_number,
            date,
            record.result_label(),
            format_strokes(record.strokes())
        );
    }
    out
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        let kept: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        name.to_string()
    }
}
