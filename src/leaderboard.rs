//! Leaderboard ranker
//!
//! Merges the real user's derived stats with a fixed synthetic peer roster,
//! sorts by a selectable metric, assigns dense 1-based ranks, and truncates
//! to a bounded window that always contains the real user. The roster is a
//! fixture value injected into the ranking pass, never persisted or
//! mutated, so a real multi-user backend can replace it without touching
//! the ranking logic.

use std::cmp::Ordering;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::{self, DbPool, StoreError};
use crate::{entries, progression, streak};

// ---------------------------------------------------------------------------
/// Entries and Metrics
// ---------------------------------------------------------------------------

/// Which derived stat the board is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Xp,
    WeightGained,
    Streak,
}

/// One row of the ranked board. `rank` is assigned by the ranking pass,
/// not stored anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub xp: i64,
    pub weight_gained: f64,
    pub streak_days: u32,
    pub level: u32,
    pub is_current_user: bool,
}

// ---------------------------------------------------------------------------
/// Peer Roster Fixture
// ---------------------------------------------------------------------------

/// Illustrative peers with deterministic stats. Read-only fixture data:
/// these are not real accounts and have no persisted lifecycle.
pub fn sample_peers() -> Vec<LeaderboardEntry> {
    const PEERS: [(&str, i64, f64, u32); 15] = [
        ("Michael Chen", 2850, 15.0, 45),
        ("Sarah Johnson", 2620, 12.0, 38),
        ("David Martinez", 2400, 10.0, 35),
        ("Emily Rodriguez", 2150, 9.0, 28),
        ("James Wilson", 1900, 8.0, 22),
        ("Jessica Brown", 1650, 7.0, 18),
        ("Christopher Lee", 1420, 6.0, 15),
        ("Amanda Taylor", 1200, 5.0, 12),
        ("Daniel Anderson", 980, 4.0, 10),
        ("Nicole Garcia", 750, 3.0, 8),
        ("Matthew Thomas", 620, 2.0, 6),
        ("Lauren Jackson", 500, 2.0, 5),
        ("Ryan Moore", 420, 1.0, 4),
        ("Rachel White", 350, 1.0, 3),
        ("Kevin Harris", 280, 1.0, 2),
    ];

    PEERS
        .iter()
        .map(|&(name, xp, weight_gained, streak_days)| LeaderboardEntry {
            rank: 0, // assigned by the ranking pass
            name: name.to_string(),
            xp,
            weight_gained,
            streak_days,
            level: progression::level_from_xp(xp),
            is_current_user: false,
        })
        .collect()
}

// ---------------------------------------------------------------------------
/// Ranking
// ---------------------------------------------------------------------------

/// Sort user + roster by the metric, assign dense ranks, and truncate to
/// `max_window` rows.
///
/// The user's row is guaranteed to survive truncation: when their rank
/// falls outside the window, the last slot is overwritten with their
/// ranked entry. Their `rank` field keeps the true value, so the displayed
/// position may not match the rank number (a preserved quirk of the
/// original behavior).
pub fn rank_entries(
    user: LeaderboardEntry,
    peers: Vec<LeaderboardEntry>,
    metric: Metric,
    max_window: usize,
) -> Vec<LeaderboardEntry> {
    let mut board = peers;
    board.push(user);

    // Stable sort: ties keep input order
    match metric {
        Metric::Xp => board.sort_by(|a, b| b.xp.cmp(&a.xp)),
        Metric::WeightGained => board.sort_by(|a, b| {
            b.weight_gained
                .partial_cmp(&a.weight_gained)
                .unwrap_or(Ordering::Equal)
        }),
        Metric::Streak => board.sort_by(|a, b| b.streak_days.cmp(&a.streak_days)),
    }

    for (i, entry) in board.iter_mut().enumerate() {
        entry.rank = (i + 1) as u32;
    }

    let user_row = board
        .iter()
        .find(|e| e.is_current_user)
        .cloned();

    board.truncate(max_window);

    if !board.iter().any(|e| e.is_current_user) {
        if let (Some(user_row), Some(last)) = (user_row, board.last_mut()) {
            *last = user_row;
        }
    }

    board
}

// ---------------------------------------------------------------------------
// Store-Coupled Operations
// ---------------------------------------------------------------------------

/// Build the real user's row from the stored records and rank it against
/// the sample roster. With no stored profile the user appears as a zeroed
/// "You" row - the board still renders.
pub async fn leaderboard(
    pool: &DbPool,
    metric: Metric,
    max_window: usize,
) -> Result<Vec<LeaderboardEntry>, StoreError> {
    let profile = db::load_profile(pool).await?;
    let weight_entries = db::load_weight_entries(pool).await?;

    let streak_days = streak::streak_days(
        weight_entries.iter().map(|e| e.logged_date),
        Utc::now().date_naive(),
    );
    let weight_gained = entries::total_weight_gained(&weight_entries);

    let user = match profile {
        Some(p) => LeaderboardEntry {
            rank: 0,
            name: p.name,
            xp: p.xp,
            weight_gained,
            streak_days,
            level: p.level,
            is_current_user: true,
        },
        None => LeaderboardEntry {
            rank: 0,
            name: "You".to_string(),
            xp: 0,
            weight_gained,
            streak_days,
            level: 1,
            is_current_user: true,
        },
    };

    Ok(rank_entries(user, sample_peers(), metric, max_window))
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
