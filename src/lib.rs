//! gainlog - progress-gamification engine for a weight-gain tracker
//!
//! Converts raw logged events (body-weight measurements, calorie entries)
//! into derived progress signals: experience points, levels, unlocked
//! achievements, day streaks, and a comparative ranking. Presentation
//! layers read these outputs and render them; nothing here draws a screen.
//!
//! The engine is a thin, mostly-pure layer over a whole-record key-value
//! store (SQLite via sqlx). Every derivation can be driven either through
//! the pure cores (explicit context in, next state out) or through the
//! store-coupled wrappers that load, compute, and persist.

pub mod achievements;
pub mod db;
pub mod entries;
pub mod leaderboard;
pub mod models;
pub mod progression;
pub mod streak;

#[cfg(test)]
pub mod test_utils;

pub use achievements::{default_catalogue, evaluate_achievements};
pub use db::{open_store, DbPool, StoreError};
pub use entries::{
    add_calorie_entry, add_weight_entry, delete_calorie_entry, delete_weight_entry,
};
pub use leaderboard::{leaderboard, LeaderboardEntry, Metric};
pub use models::{
    AchievementDefinition, AchievementState, CalorieEntry, Requirement, UserProfile,
    WeightEntry,
};
pub use progression::{level_from_xp, level_progress, xp_required_for_level, LevelProgress};
pub use streak::current_streak;
