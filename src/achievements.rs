//! Achievement engine
//!
//! Owns the catalogue of achievement definitions and the unlock pass.
//! Unlocking is exactly-once: `unlocked` is a one-way latch, the XP reward
//! is awarded at most once per achievement, and re-running the pass with
//! unchanged inputs is a no-op. That idempotence is what makes interleaved
//! re-evaluation from polling callers safe without any locking.
//!
//! Key principles:
//! - Predicates read the *current* full entry lists, never deltas
//! - Explicit context in, next state out - no ambient singleton
//! - XP awards recompute the derived level in the same step

use chrono::{DateTime, Utc};

use crate::db::{self, DbPool, StoreError};
use crate::models::{
    AchievementDefinition, AchievementState, CalorieEntry, Requirement, UserProfile,
    WeightEntry,
};
use crate::streak;

// ---------------------------------------------------------------------------
/// Catalogue
// ---------------------------------------------------------------------------

/// The immutable achievement catalogue. Ids are stable; persisted state
/// refers to these definitions by id.
pub fn default_catalogue() -> Vec<AchievementDefinition> {
    fn def(
        id: u32,
        name: &str,
        description: &str,
        xp_reward: i64,
        requirement: Requirement,
    ) -> AchievementDefinition {
        AchievementDefinition {
            id,
            name: name.to_string(),
            description: description.to_string(),
            xp_reward,
            requirement,
        }
    }

    vec![
        def(
            1,
            "First Step",
            "Log your first weight entry",
            50,
            Requirement::FirstWeightEntry,
        ),
        def(
            2,
            "Weight Warrior",
            "Gain 5 pounds",
            200,
            Requirement::WeightGained { pounds: 5.0 },
        ),
        def(
            3,
            "Weight Champion",
            "Gain 10 pounds",
            400,
            Requirement::WeightGained { pounds: 10.0 },
        ),
        def(
            4,
            "Calorie Starter",
            "Log 10 meals",
            100,
            Requirement::CaloriesLogged { entries: 10 },
        ),
        def(
            5,
            "Calorie Counter",
            "Log 50 meals",
            300,
            Requirement::CaloriesLogged { entries: 50 },
        ),
        def(
            6,
            "Calorie Master",
            "Log 100 meals",
            500,
            Requirement::CaloriesLogged { entries: 100 },
        ),
        def(
            7,
            "Week Winner",
            "Log weight 7 days in a row",
            150,
            Requirement::Streak { days: 7 },
        ),
        def(
            8,
            "Consistency King",
            "Maintain 30-day streak",
            350,
            Requirement::Streak { days: 30 },
        ),
        def(
            9,
            "Goal Crusher",
            "Reach your weight goal",
            500,
            Requirement::GoalReached,
        ),
    ]
}

/// One stored state per catalogue definition, in catalogue order.
/// Definitions with no stored state get a default locked state; stored
/// states for ids no longer in the catalogue are dropped.
pub fn reconcile(
    catalogue: &[AchievementDefinition],
    stored: &[AchievementState],
) -> Vec<AchievementState> {
    catalogue
        .iter()
        .map(|def| {
            stored
                .iter()
                .find(|s| s.id == def.id)
                .cloned()
                .unwrap_or_else(|| AchievementState::locked(def.id))
        })
        .collect()
}

// ---------------------------------------------------------------------------
/// Evaluation
// ---------------------------------------------------------------------------

/// Result of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Next achievement states, one per catalogue definition
    pub states: Vec<AchievementState>,
    /// Profile with any XP awards applied (level already recomputed)
    pub profile: UserProfile,
    /// Ids that transitioned to unlocked during this pass
    pub newly_unlocked: Vec<u32>,
}

impl Evaluation {
    pub fn changed(&self) -> bool {
        !self.newly_unlocked.is_empty()
    }
}

/// Run one unlock pass over explicit context.
///
/// Already-unlocked achievements are skipped entirely - they are never
/// re-evaluated, re-awarded, or re-locked, even if entry deletions have
/// made their predicate false again.
pub fn evaluate(
    catalogue: &[AchievementDefinition],
    stored: &[AchievementState],
    profile: &UserProfile,
    weight_entries: &[WeightEntry],
    calorie_entries: &[CalorieEntry],
    streak_days: u32,
    now: DateTime<Utc>,
) -> Evaluation {
    let mut profile = profile.clone();
    let mut newly_unlocked = Vec::new();

    let states = catalogue
        .iter()
        .zip(reconcile(catalogue, stored))
        .map(|(def, state)| {
            if state.unlocked {
                return state;
            }
            if !requirement_met(
                &def.requirement,
                weight_entries,
                calorie_entries,
                streak_days,
                &profile,
            ) {
                return state;
            }

            profile.award_xp(def.xp_reward);
            newly_unlocked.push(def.id);
            AchievementState {
                id: def.id,
                unlocked: true,
                unlocked_at: Some(now),
            }
        })
        .collect();

    Evaluation {
        states,
        profile,
        newly_unlocked,
    }
}

fn requirement_met(
    requirement: &Requirement,
    weight_entries: &[WeightEntry],
    calorie_entries: &[CalorieEntry],
    streak_days: u32,
    profile: &UserProfile,
) -> bool {
    match requirement {
        Requirement::FirstWeightEntry => !weight_entries.is_empty(),
        Requirement::WeightGained { pounds } => {
            if weight_entries.len() < 2 {
                return false;
            }
            match (earliest(weight_entries), latest(weight_entries)) {
                (Some(first), Some(last)) => last.weight - first.weight >= *pounds,
                _ => false,
            }
        }
        Requirement::CaloriesLogged { entries } => {
            calorie_entries.len() >= *entries as usize
        }
        Requirement::Streak { days } => streak_days >= *days,
        Requirement::GoalReached => {
            latest(weight_entries).is_some_and(|last| last.weight >= profile.goal_weight)
        }
    }
}

fn earliest(entries: &[WeightEntry]) -> Option<&WeightEntry> {
    entries.iter().min_by_key(|e| e.timestamp_millis)
}

fn latest(entries: &[WeightEntry]) -> Option<&WeightEntry> {
    entries.iter().max_by_key(|e| e.timestamp_millis)
}

// ---------------------------------------------------------------------------
// Store-Coupled Operations
// ---------------------------------------------------------------------------

/// Load the current aggregates, run one unlock pass, and persist the
/// outcome if any achievement transitioned.
///
/// With no stored profile this is a no-op: there is nothing to award XP
/// to, so the stored states come back unchanged (reconciled against the
/// catalogue so callers always see one state per definition).
pub async fn evaluate_achievements(pool: &DbPool) -> Result<Vec<AchievementState>, StoreError> {
    let catalogue = default_catalogue();
    let stored = db::load_achievement_states(pool).await?;

    let Some(profile) = db::load_profile(pool).await? else {
        return Ok(reconcile(&catalogue, &stored));
    };

    let weight_entries = db::load_weight_entries(pool).await?;
    let calorie_entries = db::load_calorie_entries(pool).await?;

    let now = Utc::now();
    let streak_days = streak::streak_days(
        weight_entries.iter().map(|e| e.logged_date),
        now.date_naive(),
    );

    let outcome = evaluate(
        &catalogue,
        &stored,
        &profile,
        &weight_entries,
        &calorie_entries,
        streak_days,
        now,
    );

    if outcome.changed() {
        db::save_profile(pool, &outcome.profile).await?;
        db::save_achievement_states(pool, &outcome.states).await?;
        tracing::debug!(unlocked = ?outcome.newly_unlocked, "achievements unlocked");
    }

    Ok(outcome.states)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
