//! Weight and calorie entry operations
//!
//! The mutating half of the engine's contract: every add or delete saves
//! the whole entry list back to the store and then re-runs the achievement
//! pass, so derived signals are never stale. Polling callers do not need
//! to know which mutation happened.

use chrono::{DateTime, NaiveDate, Utc};

use crate::achievements;
use crate::db::{self, DbPool, StoreError};
use crate::models::{CalorieEntry, WeightEntry};

/// Default daily calorie target shown against today's total.
pub const DEFAULT_CALORIE_GOAL: i64 = 2500;

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Net weight gained over the logged history: last minus first by
/// timestamp order, floored at 0. Fewer than two entries is no gain.
pub fn total_weight_gained(entries: &[WeightEntry]) -> f64 {
    if entries.len() < 2 {
        return 0.0;
    }
    let first = entries.iter().min_by_key(|e| e.timestamp_millis);
    let last = entries.iter().max_by_key(|e| e.timestamp_millis);
    match (first, last) {
        (Some(first), Some(last)) => (last.weight - first.weight).max(0.0),
        _ => 0.0,
    }
}

/// Calories logged on the given calendar day.
pub fn today_calories(entries: &[CalorieEntry], today: NaiveDate) -> i64 {
    entries
        .iter()
        .filter(|e| e.logged_date == today)
        .map(|e| e.calories)
        .sum()
}

// ---------------------------------------------------------------------------
// Store-Coupled Operations
// ---------------------------------------------------------------------------

/// Append a weight entry, update the profile's current weight, and re-run
/// the achievement pass.
pub async fn add_weight_entry(
    pool: &DbPool,
    weight: f64,
    at: DateTime<Utc>,
) -> Result<WeightEntry, StoreError> {
    let entry = WeightEntry::new(weight, at);

    let mut entries = db::load_weight_entries(pool).await?;
    entries.push(entry.clone());
    entries.sort_by_key(|e| e.timestamp_millis);
    db::save_weight_entries(pool, &entries).await?;

    if let Some(mut profile) = db::load_profile(pool).await? {
        profile.current_weight = weight;
        db::save_profile(pool, &profile).await?;
    }

    achievements::evaluate_achievements(pool).await?;
    Ok(entry)
}

/// Delete a weight entry by id and re-run the achievement pass. Unlocked
/// achievements stay unlocked even if the deletion makes their predicate
/// false again.
pub async fn delete_weight_entry(pool: &DbPool, id: i64) -> Result<(), StoreError> {
    let mut entries = db::load_weight_entries(pool).await?;
    entries.retain(|e| e.id != id);
    db::save_weight_entries(pool, &entries).await?;

    achievements::evaluate_achievements(pool).await?;
    Ok(())
}

/// Append a calorie entry and re-run the achievement pass.
pub async fn add_calorie_entry(
    pool: &DbPool,
    food_name: &str,
    calories: i64,
    photo_ref: Option<String>,
    at: DateTime<Utc>,
) -> Result<CalorieEntry, StoreError> {
    let entry = CalorieEntry::new(food_name, calories, photo_ref, at);

    let mut entries = db::load_calorie_entries(pool).await?;
    entries.push(entry.clone());
    entries.sort_by_key(|e| e.timestamp_millis);
    db::save_calorie_entries(pool, &entries).await?;

    achievements::evaluate_achievements(pool).await?;
    Ok(entry)
}

pub async fn delete_calorie_entry(pool: &DbPool, id: i64) -> Result<(), StoreError> {
    let mut entries = db::load_calorie_entries(pool).await?;
    entries.retain(|e| e.id != id);
    db::save_calorie_entries(pool, &entries).await?;

    achievements::evaluate_achievements(pool).await?;
    Ok(())
}
