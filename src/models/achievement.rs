use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a user must do to unlock an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
  /// At least one weight entry exists
  FirstWeightEntry,
  /// Last weight minus first weight (timestamp order) meets the threshold;
  /// needs at least two entries
  WeightGained { pounds: f64 },
  /// Total calorie-entry count meets the threshold
  CaloriesLogged { entries: u32 },
  /// Consecutive-logging-day streak meets the threshold
  Streak { days: u32 },
  /// Last logged weight has reached the profile's goal weight
  GoalReached,
}

/// One row of the immutable achievement catalogue.
///
/// Ids are stable across the catalogue's lifetime; persisted state refers
/// to definitions by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDefinition {
  pub id: u32,
  pub name: String,
  pub description: String,
  pub xp_reward: i64,
  pub requirement: Requirement,
}

/// Per-definition unlock state, the only achievement data that persists.
///
/// `unlocked` is a one-way latch: once true it never resets, and
/// `unlocked_at` is stamped exactly once, at the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementState {
  pub id: u32,
  pub unlocked: bool,
  pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementState {
  /// Default state for a definition that has never been unlocked.
  pub fn locked(id: u32) -> Self {
    Self {
      id,
      unlocked: false,
      unlocked_at: None,
    }
  }
}
