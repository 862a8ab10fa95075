use serde::{Deserialize, Serialize};

use crate::record::Snapshot;
use crate::stats::PlayerStatistics;

/// One row of the standings. Ranks start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_name: String,
    pub total_strokes: i32,
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl LeaderboardEntry {
    pub fn tier(&self) -> RankTier {
        RankTier::for_rank(self.rank)
    }
}

/// Podium places get their own tier; everyone else shares one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankTier {
    Gold,
    Silver,
    Bronze,
    Field,
}

impl RankTier {
    pub fn for_rank(rank: u32) -> RankTier {
        match rank {
            1 => RankTier::Gold,
            2 => RankTier::Silver,
            3 => RankTier::Bronze,
            _ => RankTier::Field,
        }
    }
}

/// Rank every player in the snapshot by total strokes, fewest first.
/// Players on equal strokes are ordered by name so the table is stable
/// between reloads.
pub fn rank_players(snapshot: &Snapshot) -> Vec<LeaderboardEntry> {
    let mut standings: Vec<(String, PlayerStatistics)> = snapshot
        .players()
        .into_iter()
        .map(|name| {
            let stats = PlayerStatistics::from_records(snapshot.history(name));
            (name.to_string(), stats)
        })
        .collect();

    standings.sort_by(|(a_name, a), (b_name, b)| {
        a.total_strokes
            .cmp(&b.total_strokes)
            .then_with(|| a_name.cmp(b_name))
    });

    standings
        .into_iter()
        .enumerate()
        .map(|(i, (player_name, stats))| LeaderboardEntry {
            rank: (i + 1) as u32,
            player_name,
            total_strokes: stats.total_strokes,
            total_games: stats.total_games,
            wins: stats.wins,
            losses: stats.losses,
        })
        .collect()
}
