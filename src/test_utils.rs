//! Test utilities and helpers
//!
//! Common test infrastructure:
//! - In-memory store setup/teardown
//! - Record seeding helpers
//! - Mock data factories

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::db;
use crate::models::{CalorieEntry, UserProfile, WeightEntry};

/// ---------------------------------------------------------------------------
/// Store Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite store for testing.
/// Runs all migrations and returns a ready-to-use pool.
///
/// Uses max_connections(1) to prevent multiple pool connections from
/// creating isolated in-memory databases, which would cause intermittent
/// test failures.
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test store pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed a stored profile with 0 XP at level 1
pub async fn seed_profile(pool: &SqlitePool, current_weight: f64, goal_weight: f64) -> UserProfile {
  let profile = UserProfile::new("Test User", current_weight, goal_weight);
  db::save_profile(pool, &profile)
    .await
    .expect("Failed to seed profile");
  profile
}

/// Seed weight entries on consecutive days ending today, one per weight,
/// in the given order. Ids/timestamps ascend with the days.
pub async fn seed_weight_entries(pool: &SqlitePool, weights: &[f64]) -> Vec<WeightEntry> {
  let entries: Vec<WeightEntry> = weights
    .iter()
    .enumerate()
    .map(|(i, &weight)| {
      let days_ago = (weights.len() - 1 - i) as i64;
      WeightEntry::new(weight, Utc::now() - Duration::days(days_ago))
    })
    .collect();

  db::save_weight_entries(pool, &entries)
    .await
    .expect("Failed to seed weight entries");
  entries
}

/// Seed `count` calorie entries, all logged today
pub async fn seed_calorie_entries(pool: &SqlitePool, count: usize) -> Vec<CalorieEntry> {
  let entries: Vec<CalorieEntry> = (0..count)
    .map(|i| {
      let mut entry = CalorieEntry::new(format!("meal {}", i), 500, None, Utc::now());
      // Date::now() granularity in tests can collide; keep ids unique
      entry.id += i as i64;
      entry.timestamp_millis = entry.id;
      entry
    })
    .collect();

  db::save_calorie_entries(pool, &entries)
    .await
    .expect("Failed to seed calorie entries");
  entries
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a mock profile without touching the store
pub fn mock_profile(xp: i64) -> UserProfile {
  let mut profile = UserProfile::new("Test User", 150.0, 170.0);
  profile.award_xp(xp);
  profile
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Create a DateTime N days ago from now
pub fn datetime_days_ago(days: i64) -> DateTime<Utc> {
  Utc::now() - Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'records'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1, "records table must exist");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_weight_entries_ascend_and_end_today() {
    let pool = setup_test_db().await;

    let entries = seed_weight_entries(&pool, &[150.0, 152.0, 154.0]).await;

    assert_eq!(entries.len(), 3);
    assert!(entries[0].timestamp_millis < entries[2].timestamp_millis);
    assert_eq!(entries[2].logged_date, Utc::now().date_naive());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_profile_levels_match_xp() {
    let profile = mock_profile(450);
    assert_eq!(profile.level, 3);
  }

  #[test]
  fn test_datetime_helper_produces_past_dates() {
    let past = datetime_days_ago(7);
    let diff = Utc::now() - past;
    assert!(diff.num_days() >= 6 && diff.num_days() <= 8);
  }
}
