//! Day-streak arithmetic.
//!
//! A calendar day counts toward the streak when at least two of the
//! three daily goals were met, or the daily mission was completed.
//! The transition function is pure: the same (last counted date,
//! today, goals) triple always produces the same decision, so callers
//! can safely re-evaluate within a day.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Goal signals for one calendar day, computed by other subsystems
/// (pedometer, hydration, sleep log). Opaque booleans here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub steps_goal_met: bool,
    pub water_goal_met: bool,
    pub sleep_goal_met: bool,
    pub mission_completed: bool,
}

impl DailyGoals {
    /// Goals for a day whose mission was completed (e.g. a finished
    /// workout), regardless of the tracked goals.
    pub fn mission() -> Self {
        Self {
            mission_completed: true,
            ..Self::default()
        }
    }

    /// Whether this day is eligible to count toward the streak:
    /// two of three goals met, or the mission completed.
    pub fn qualifies(&self) -> bool {
        let met = [self.steps_goal_met, self.water_goal_met, self.sleep_goal_met]
            .iter()
            .filter(|m| **m)
            .count();
        met >= 2 || self.mission_completed
    }
}

/// Outcome of evaluating one day against the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// Goals not met; the streak is untouched.
    Ineligible,
    /// Today was already counted; repeated calls are no-ops.
    AlreadyCounted,
    /// Yesterday was counted; the streak grew by one.
    Continued { streak: u32 },
    /// First counted day ever, or a gap of two or more days.
    Started { streak: u32 },
}

impl StreakTransition {
    /// The streak length after this transition, given the length
    /// before it.
    pub fn streak_after(&self, previous: u32) -> u32 {
        match self {
            StreakTransition::Ineligible | StreakTransition::AlreadyCounted => previous,
            StreakTransition::Continued { streak } | StreakTransition::Started { streak } => {
                *streak
            }
        }
    }

    /// Whether this transition counted `today` (and the caller should
    /// record it as the last counted date).
    pub fn counted(&self) -> bool {
        matches!(
            self,
            StreakTransition::Continued { .. } | StreakTransition::Started { .. }
        )
    }
}

/// Decides whether `today` counts toward the streak and what the new
/// streak length is.
///
/// Idempotent within a day: once `today` equals the last counted
/// date, further calls return [`StreakTransition::AlreadyCounted`].
pub fn evaluate_day(
    current_streak: u32,
    last_counted: Option<NaiveDate>,
    today: NaiveDate,
    goals: &DailyGoals,
) -> StreakTransition {
    if !goals.qualifies() {
        return StreakTransition::Ineligible;
    }

    match last_counted {
        Some(last) if last == today => StreakTransition::AlreadyCounted,
        Some(last) if last == today - Duration::days(1) => StreakTransition::Continued {
            streak: current_streak + 1,
        },
        // Gap of two or more days, a last date in the future (clock
        // skew), or no prior date: the streak restarts at one.
        _ => StreakTransition::Started { streak: 1 },
    }
}

/// Whole days elapsed between the previous workout and `now`.
/// Used for comeback detection, independently of the streak
/// transition -- a comeback can coincide with a streak reset.
pub fn gap_days(last_workout_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now.date_naive() - last_workout_at.date_naive()).num_days()
}
