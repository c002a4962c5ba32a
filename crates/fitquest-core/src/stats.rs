//! The durable user aggregate and the events folded into it.
//!
//! `UserStats` is the single persisted document: every cumulative
//! counter, the unique-exercise set, streak state, and the unlock
//! records live here. All counters are monotonically non-decreasing
//! except `current_streak`; `longest_streak` never falls below
//! `current_streak`.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::{DailyGoals, StreakTransition};

/// Time-of-day bucket for a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// 05:00 - 11:59
    Morning,
    /// 12:00 - 17:59
    Afternoon,
    /// 18:00 - 21:59
    Evening,
    /// 22:00 - 04:59
    Night,
}

impl Timeframe {
    /// Bucket for an hour of day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Timeframe::Morning,
            12..=17 => Timeframe::Afternoon,
            18..=21 => Timeframe::Evening,
            _ => Timeframe::Night,
        }
    }

    pub fn of(at: DateTime<Utc>) -> Self {
        Self::from_hour(at.hour())
    }
}

/// Meteorological season, northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::from_month(date.month())
    }

    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];
}

/// Workout intensity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
    Extreme,
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            "extreme" => Ok(Intensity::Extreme),
            other => Err(format!("unknown intensity: {other}")),
        }
    }
}

/// Exercise category buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Core,
    FullBody,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 5] = [
        ExerciseCategory::Strength,
        ExerciseCategory::Cardio,
        ExerciseCategory::Flexibility,
        ExerciseCategory::Core,
        ExerciseCategory::FullBody,
    ];
}

impl FromStr for ExerciseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(ExerciseCategory::Strength),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "flexibility" => Ok(ExerciseCategory::Flexibility),
            "core" => Ok(ExerciseCategory::Core),
            "full_body" => Ok(ExerciseCategory::FullBody),
            other => Err(format!("unknown exercise category: {other}")),
        }
    }
}

/// One unlock record. Created exactly once per achievement, never
/// mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

fn default_created_at() -> DateTime<Utc> {
    Utc::now()
}

/// The single mutable aggregate for one user.
///
/// Every field defaults independently so documents persisted by older
/// versions (before a counter existed) deserialize with safe zeros
/// instead of failing (additive-schema rule).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub total_minutes: u64,
    #[serde(default)]
    pub longest_workout_minutes: u32,
    #[serde(default)]
    pub workouts_by_timeframe: HashMap<Timeframe, u32>,
    #[serde(default)]
    pub workouts_by_category: HashMap<ExerciseCategory, u32>,
    #[serde(default)]
    pub workouts_by_season: HashMap<Season, u32>,
    #[serde(default)]
    pub workouts_by_intensity: HashMap<Intensity, u32>,
    #[serde(default)]
    pub perfect_form_count: u32,
    #[serde(default)]
    pub personal_record_count: u32,
    #[serde(default)]
    pub share_count: u32,
    #[serde(default)]
    pub unique_exercises: HashSet<String>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Last calendar day counted toward the streak.
    #[serde(default)]
    pub last_counted_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_workout_at: Option<DateTime<Utc>>,
    /// Largest inactivity gap (whole days) ever recovered from.
    /// Monotone, so comeback requirements stay idempotent.
    #[serde(default)]
    pub longest_comeback_gap_days: u32,
    #[serde(default = "default_created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub unlocked_achievements: Vec<UnlockedAchievement>,

    /// Membership index over `unlocked_achievements`. Rebuilt after
    /// deserialization; never persisted.
    #[serde(skip)]
    unlocked_index: HashSet<String>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_xp: 0,
            total_workouts: 0,
            total_minutes: 0,
            longest_workout_minutes: 0,
            workouts_by_timeframe: HashMap::new(),
            workouts_by_category: HashMap::new(),
            workouts_by_season: HashMap::new(),
            workouts_by_intensity: HashMap::new(),
            perfect_form_count: 0,
            personal_record_count: 0,
            share_count: 0,
            unique_exercises: HashSet::new(),
            current_streak: 0,
            longest_streak: 0,
            last_counted_date: None,
            last_workout_at: None,
            longest_comeback_gap_days: 0,
            created_at: Utc::now(),
            unlocked_achievements: Vec::new(),
            unlocked_index: HashSet::new(),
        }
    }
}

impl UserStats {
    /// Rebuilds the unlock membership index and repairs invariants a
    /// hand-edited or partially-written document may violate.
    pub fn normalize(&mut self) {
        self.unlocked_index = self
            .unlocked_achievements
            .iter()
            .map(|u| u.achievement_id.clone())
            .collect();
        if self.longest_streak < self.current_streak {
            self.longest_streak = self.current_streak;
        }
    }

    /// O(1) membership test against the unlocked set.
    pub fn is_unlocked(&self, achievement_id: &str) -> bool {
        self.unlocked_index.contains(achievement_id)
    }

    /// Records an unlock exactly once. Returns false (and leaves the
    /// aggregate untouched) if the id was already unlocked.
    pub fn record_unlock(&mut self, achievement_id: &str, at: DateTime<Utc>) -> bool {
        if !self.unlocked_index.insert(achievement_id.to_string()) {
            return false;
        }
        self.unlocked_achievements.push(UnlockedAchievement {
            achievement_id: achievement_id.to_string(),
            unlocked_at: at,
        });
        true
    }

    /// Folds a streak transition into the aggregate, keeping
    /// `longest_streak` the running maximum.
    pub fn apply_streak(&mut self, transition: StreakTransition, today: NaiveDate) {
        self.current_streak = transition.streak_after(self.current_streak);
        if transition.counted() {
            self.last_counted_date = Some(today);
        }
        if self.current_streak > self.longest_streak {
            self.longest_streak = self.current_streak;
        }
    }

    /// Merges exercise ids into the unique set. Duplicates never
    /// survive; the set never shrinks.
    pub fn merge_exercises<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.unique_exercises.insert(id.into());
        }
    }

    /// Distinct exercise categories trained at least once.
    pub fn categories_trained(&self) -> usize {
        self.workouts_by_category.values().filter(|c| **c > 0).count()
    }

    /// Distinct seasons with at least one workout.
    pub fn seasons_trained(&self) -> usize {
        self.workouts_by_season.values().filter(|c| **c > 0).count()
    }

    pub fn workouts_in_timeframe(&self, timeframe: Timeframe) -> u32 {
        self.workouts_by_timeframe.get(&timeframe).copied().unwrap_or(0)
    }

    pub fn workouts_in_category(&self, category: ExerciseCategory) -> u32 {
        self.workouts_by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn workouts_in_season(&self, season: Season) -> u32 {
        self.workouts_by_season.get(&season).copied().unwrap_or(0)
    }

    pub fn workouts_at_intensity(&self, intensity: Intensity) -> u32 {
        self.workouts_by_intensity.get(&intensity).copied().unwrap_or(0)
    }
}

/// A completed workout, as reported by the host. Consumed once by the
/// stats store and discarded; never persisted as-is.
#[derive(Debug, Clone)]
pub struct WorkoutEvent {
    pub xp_earned: u64,
    pub exercise_ids: Vec<String>,
    pub categories: Vec<ExerciseCategory>,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub perfect_form: bool,
    pub personal_record: bool,
    /// Explicit event timestamp; defaults to now when absent.
    pub completed_at: Option<DateTime<Utc>>,
    /// User birthday, for the special-date rules.
    pub birthday: Option<NaiveDate>,
    /// Goal signals for the event's day. A completed workout counts
    /// as the daily mission unless the host says otherwise.
    pub goals: DailyGoals,
}

impl WorkoutEvent {
    pub fn new(xp_earned: u64) -> Self {
        Self {
            xp_earned,
            exercise_ids: Vec::new(),
            categories: Vec::new(),
            duration_minutes: 0,
            intensity: Intensity::Medium,
            perfect_form: false,
            personal_record: false,
            completed_at: None,
            birthday: None,
            goals: DailyGoals::mission(),
        }
    }

    pub fn with_exercises<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exercise_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = ExerciseCategory>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn lasting(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn perfect_form(mut self) -> Self {
        self.perfect_form = true;
        self
    }

    pub fn personal_record(mut self) -> Self {
        self.personal_record = true;
        self
    }

    pub fn at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_goals(mut self, goals: DailyGoals) -> Self {
        self.goals = goals;
        self
    }

    /// The event's effective timestamp.
    pub fn effective_at(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_buckets() {
        assert_eq!(Timeframe::from_hour(6), Timeframe::Morning);
        assert_eq!(Timeframe::from_hour(13), Timeframe::Afternoon);
        assert_eq!(Timeframe::from_hour(20), Timeframe::Evening);
        assert_eq!(Timeframe::from_hour(23), Timeframe::Night);
        assert_eq!(Timeframe::from_hour(3), Timeframe::Night);
    }

    #[test]
    fn test_season_buckets() {
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Autumn);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn test_record_unlock_once() {
        let mut stats = UserStats::default();
        assert!(stats.record_unlock("first_workout", Utc::now()));
        assert!(!stats.record_unlock("first_workout", Utc::now()));
        assert_eq!(stats.unlocked_achievements.len(), 1);
        assert!(stats.is_unlocked("first_workout"));
    }

    #[test]
    fn test_merge_exercises_deduplicates() {
        let mut stats = UserStats::default();
        stats.merge_exercises(["push_up", "squat"]);
        stats.merge_exercises(["push_up"]);
        assert_eq!(stats.unique_exercises.len(), 2);
    }

    #[test]
    fn test_normalize_rebuilds_index_and_longest_streak() {
        let json = r#"{
            "total_xp": 500,
            "current_streak": 7,
            "longest_streak": 3,
            "unlocked_achievements": [
                {"achievement_id": "streak_3", "unlocked_at": "2025-01-06T10:00:00Z"}
            ]
        }"#;
        let mut stats: UserStats = serde_json::from_str(json).unwrap();
        stats.normalize();

        assert!(stats.is_unlocked("streak_3"));
        assert_eq!(stats.longest_streak, 7);
        // Missing counters defaulted, not rejected
        assert_eq!(stats.total_workouts, 0);
    }

    #[test]
    fn test_dates_roundtrip_as_iso_8601() {
        let mut stats = UserStats::default();
        stats.last_counted_date = Some("2025-01-06".parse().unwrap());
        stats.last_workout_at = Some("2025-01-06T18:30:00Z".parse().unwrap());

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"2025-01-06\""));

        let back: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.last_counted_date, stats.last_counted_date);
        assert_eq!(back.last_workout_at, stats.last_workout_at);
    }
}
