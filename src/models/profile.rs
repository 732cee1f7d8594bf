use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progression;

/// The single tracked user.
///
/// `level` is derived state and must always equal
/// `progression::level_from_xp(xp)`. Only XP-awarding operations and
/// explicit profile edits may touch `xp`, and both go through
/// [`UserProfile::award_xp`] / [`UserProfile::sync_level`] so the two
/// fields never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
  pub name: String,
  pub current_weight: f64,
  pub goal_weight: f64,
  pub xp: i64,
  pub level: u32,
  pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
  pub fn new(name: impl Into<String>, current_weight: f64, goal_weight: f64) -> Self {
    Self {
      name: name.into(),
      current_weight,
      goal_weight,
      xp: 0,
      level: 1,
      created_at: Some(Utc::now()),
    }
  }

  /// Add XP and recompute the derived level in the same step.
  ///
  /// Negative amounts are a caller contract violation and are clamped to
  /// zero so `xp` stays monotone.
  pub fn award_xp(&mut self, amount: i64) {
    self.xp += amount.max(0);
    self.sync_level();
  }

  /// Recompute `level` from `xp` after an explicit profile edit.
  pub fn sync_level(&mut self) {
    self.level = progression::level_from_xp(self.xp);
  }
}
