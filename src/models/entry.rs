use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged body-weight measurement.
///
/// `id` is the creation timestamp in milliseconds, so ids sort in
/// creation order without a separate counter. Canonical list order is
/// ascending `timestamp_millis`. Entries are immutable once created,
/// except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
  pub id: i64,
  pub weight: f64,
  pub logged_date: NaiveDate,
  pub timestamp_millis: i64,
}

impl WeightEntry {
  pub fn new(weight: f64, at: DateTime<Utc>) -> Self {
    let millis = at.timestamp_millis();
    Self {
      id: millis,
      weight,
      logged_date: at.date_naive(),
      timestamp_millis: millis,
    }
  }
}

/// One logged meal. `photo_ref` points at an externally stored photo used
/// by the (out-of-scope) calorie guesser; this layer only carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieEntry {
  pub id: i64,
  pub food_name: String,
  pub calories: i64,
  pub logged_date: NaiveDate,
  pub timestamp_millis: i64,
  pub photo_ref: Option<String>,
}

impl CalorieEntry {
  pub fn new(
    food_name: impl Into<String>,
    calories: i64,
    photo_ref: Option<String>,
    at: DateTime<Utc>,
  ) -> Self {
    let millis = at.timestamp_millis();
    Self {
      id: millis,
      food_name: food_name.into(),
      // negative calories are a caller contract violation; clamp at the boundary
      calories: calories.max(0),
      logged_date: at.date_naive(),
      timestamp_millis: millis,
      photo_ref,
    }
  }
}
