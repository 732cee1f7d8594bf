//! Level/XP progression table
//!
//! Pure conversion between cumulative XP and levels. Level 1 costs 0 XP;
//! the marginal cost of reaching level n from n-1 is `150 + 50*(n-2)`
//! (200, 250, 300, ... for levels 2, 3, 4, ...), so the cumulative table
//! runs 0, 200, 450, 750, 1100, ...
//!
//! Both directions are total and side-effect free. Negative XP is a caller
//! contract violation and is clamped to the table floor (level 1).

use serde::{Deserialize, Serialize};

/// Cumulative XP required to reach a level. Strictly increasing in `level`
/// for level >= 1; quadratic overall.
pub fn xp_required_for_level(level: u32) -> i64 {
    if level <= 1 {
        return 0;
    }
    (2..=i64::from(level)).map(|n| 150 + (n - 2) * 50).sum()
}

/// The largest level L with `xp_required_for_level(L) <= xp`.
///
/// Exact inverse of [`xp_required_for_level`] at table breakpoints.
pub fn level_from_xp(xp: i64) -> u32 {
    let xp = xp.max(0);
    let mut level = 1;
    while xp_required_for_level(level + 1) <= xp {
        level += 1;
    }
    level
}

/// Position within the current level, for XP-bar style displays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since crossing into the current level
    pub xp_into_level: i64,
    /// Marginal cost of the next level
    pub xp_for_next_level: i64,
}

pub fn level_progress(xp: i64) -> LevelProgress {
    let xp = xp.max(0);
    let level = level_from_xp(xp);
    let floor = xp_required_for_level(level);
    LevelProgress {
        level,
        xp_into_level: xp - floor,
        xp_for_next_level: xp_required_for_level(level + 1) - floor,
    }
}
