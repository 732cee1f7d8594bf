//! Consecutive-logging-day streak
//!
//! Derives the current streak from the set of weight-log calendar dates.
//! The streak is anchored to the present: if neither today nor yesterday
//! has a log, the streak is broken and counts as 0 even though past
//! consecutive runs still exist in history. Because the result changes
//! with the passage of time alone, it is recomputed on demand and never
//! cached.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};

use crate::db::{self, DbPool, StoreError};

/// Count consecutive logged days ending at the most recent logged date.
///
/// Duplicate dates collapse to one. `today` is the evaluation instant's
/// calendar date, passed explicitly so callers and tests control the clock.
pub fn streak_days<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let Some(&latest) = dates.iter().next_back() else {
        return 0;
    };

    // A gap of 2+ days since the last log breaks the streak
    let recent = dates.contains(&today)
        || today
            .pred_opt()
            .is_some_and(|yesterday| dates.contains(&yesterday));
    if !recent {
        return 0;
    }

    let mut streak = 0;
    let mut day = latest;
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Current streak over the stored weight entries, anchored at today.
pub async fn current_streak(pool: &DbPool) -> Result<u32, StoreError> {
    let entries = db::load_weight_entries(pool).await?;
    Ok(streak_days(
        entries.iter().map(|e| e.logged_date),
        Utc::now().date_naive(),
    ))
}
