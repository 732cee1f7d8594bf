use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::{AchievementState, CalorieEntry, UserProfile, WeightEntry};

pub type DbPool = SqlitePool;

/// Keys of the four persisted records. Each is stored as a whole JSON blob;
/// there are no partial updates.
pub const USER_PROFILE: &str = "user_profile";
pub const WEIGHT_ENTRIES: &str = "weight_entries";
pub const CALORIE_ENTRIES: &str = "calorie_entries";
pub const ACHIEVEMENT_STATES: &str = "achievement_states";

/// Storage failures. Malformed records are deliberately NOT represented
/// here: a record that fails to parse falls back to its default value so
/// the rest of the system keeps functioning (see `load_json`).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Encode(#[from] serde_json::Error),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

/// Open (creating if needed) the store at the given path and run migrations.
pub async fn open_store(db_path: &Path) -> Result<DbPool, StoreError> {
  if let Some(dir) = db_path.parent() {
    fs::create_dir_all(dir)?;
  }
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  Ok(pool)
}

/// Load one record, falling back to `None` when it is absent or malformed.
/// A parse failure is logged and swallowed rather than propagated: the
/// engine always degrades to its documented empty-input behavior.
async fn load_json<T: DeserializeOwned>(
  pool: &DbPool,
  key: &str,
) -> Result<Option<T>, StoreError> {
  let row: Option<(String,)> =
    sqlx::query_as("SELECT value FROM records WHERE key = ?1")
      .bind(key)
      .fetch_optional(pool)
      .await?;

  match row {
    None => Ok(None),
    Some((raw,)) => match serde_json::from_str(&raw) {
      Ok(value) => Ok(Some(value)),
      Err(e) => {
        tracing::warn!(key, error = %e, "malformed stored record, using default");
        Ok(None)
      }
    },
  }
}

/// Overwrite one record with a fresh JSON blob.
async fn save_json<T: Serialize>(
  pool: &DbPool,
  key: &str,
  value: &T,
) -> Result<(), StoreError> {
  let raw = serde_json::to_string(value)?;
  sqlx::query(
    r#"
    INSERT INTO records (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
      value = excluded.value,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(key)
  .bind(raw)
  .bind(Utc::now().to_rfc3339())
  .execute(pool)
  .await?;

  Ok(())
}

pub async fn load_profile(pool: &DbPool) -> Result<Option<UserProfile>, StoreError> {
  load_json(pool, USER_PROFILE).await
}

pub async fn save_profile(pool: &DbPool, profile: &UserProfile) -> Result<(), StoreError> {
  save_json(pool, USER_PROFILE, profile).await
}

/// Stored weight entries in canonical (ascending timestamp) order.
pub async fn load_weight_entries(pool: &DbPool) -> Result<Vec<WeightEntry>, StoreError> {
  let mut entries: Vec<WeightEntry> =
    load_json(pool, WEIGHT_ENTRIES).await?.unwrap_or_default();
  entries.sort_by_key(|e| e.timestamp_millis);
  Ok(entries)
}

pub async fn save_weight_entries(
  pool: &DbPool,
  entries: &[WeightEntry],
) -> Result<(), StoreError> {
  save_json(pool, WEIGHT_ENTRIES, &entries).await
}

pub async fn load_calorie_entries(pool: &DbPool) -> Result<Vec<CalorieEntry>, StoreError> {
  let mut entries: Vec<CalorieEntry> =
    load_json(pool, CALORIE_ENTRIES).await?.unwrap_or_default();
  entries.sort_by_key(|e| e.timestamp_millis);
  Ok(entries)
}

pub async fn save_calorie_entries(
  pool: &DbPool,
  entries: &[CalorieEntry],
) -> Result<(), StoreError> {
  save_json(pool, CALORIE_ENTRIES, &entries).await
}

/// Raw stored achievement states. The achievement engine reconciles these
/// against the catalogue before use.
pub async fn load_achievement_states(
  pool: &DbPool,
) -> Result<Vec<AchievementState>, StoreError> {
  Ok(load_json(pool, ACHIEVEMENT_STATES).await?.unwrap_or_default())
}

pub async fn save_achievement_states(
  pool: &DbPool,
  states: &[AchievementState],
) -> Result<(), StoreError> {
  save_json(pool, ACHIEVEMENT_STATES, &states).await
}
