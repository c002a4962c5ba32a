//! The requirement evaluation engine.
//!
//! Dispatches on requirement kind, compares the relevant counter in
//! the stats snapshot against the threshold, and computes fractional
//! progress for unsatisfied entries. Detection never mutates the
//! snapshot: calling it twice on unchanged stats returns the same
//! list, and merging the results into the unlocked set exactly once
//! is the store's job.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{AchievementCatalog, AchievementDefinition, Requirement};
use crate::stats::UserStats;

/// Fractional progress toward a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementProgress {
    pub current: u64,
    pub target: u64,
    /// Always within [0, 100], even when `current > target`.
    pub percentage: f64,
}

/// (current, target) for the counter-threshold kinds. `None` for the
/// kinds without a meaningful counter (custom, special-date).
fn counter(requirement: &Requirement, stats: &UserStats) -> Option<(u64, u64)> {
    let pair = match requirement {
        Requirement::WorkoutsInTimeframe { timeframe, value } => {
            (stats.workouts_in_timeframe(*timeframe) as u64, *value as u64)
        }
        Requirement::TotalXp { value } => (stats.total_xp, *value),
        Requirement::ConsecutiveDays { value } => (stats.current_streak as u64, *value as u64),
        Requirement::CategoryCount { category, value } => {
            (stats.workouts_in_category(*category) as u64, *value as u64)
        }
        Requirement::UniqueExercises { value } => {
            (stats.unique_exercises.len() as u64, *value as u64)
        }
        Requirement::TotalWorkouts { value } => (stats.total_workouts as u64, *value as u64),
        Requirement::SingleWorkoutDuration { minutes } => {
            (stats.longest_workout_minutes as u64, *minutes as u64)
        }
        Requirement::ShareCount { value } => (stats.share_count as u64, *value as u64),
        Requirement::PerfectFormCount { value } => {
            (stats.perfect_form_count as u64, *value as u64)
        }
        Requirement::ComebackGap { days } => {
            (stats.longest_comeback_gap_days as u64, *days as u64)
        }
        Requirement::PersonalRecordCount { value } => {
            (stats.personal_record_count as u64, *value as u64)
        }
        Requirement::VarietyStreak { value } => (stats.categories_trained() as u64, *value as u64),
        Requirement::SeasonalCount { season, value } => {
            (stats.workouts_in_season(*season) as u64, *value as u64)
        }
        Requirement::IntensityCount { intensity, value } => {
            (stats.workouts_at_intensity(*intensity) as u64, *value as u64)
        }
        Requirement::AchievementsUnlocked { value } => {
            (stats.unlocked_achievements.len() as u64, *value as u64)
        }
        Requirement::SpecialDate { .. } | Requirement::Custom { .. } => return None,
    };
    Some(pair)
}

/// Whether the requirement holds against the snapshot.
///
/// A panicking custom predicate counts as "not satisfied" for that
/// one entry; the rest of the catalog is unaffected.
pub fn is_satisfied(requirement: &Requirement, stats: &UserStats) -> bool {
    match requirement {
        // Point-in-time facts, captured by the special-date detector
        // at event time. Never satisfiable from accumulated stats.
        Requirement::SpecialDate { .. } => false,
        Requirement::Custom { predicate } => {
            let predicate = *predicate;
            catch_unwind(AssertUnwindSafe(|| predicate(stats))).unwrap_or_else(|_| {
                warn!("custom requirement predicate panicked; treating as not satisfied");
                false
            })
        }
        _ => match counter(requirement, stats) {
            Some((current, target)) => current >= target,
            None => false,
        },
    }
}

/// Fractional progress toward the requirement, clamped to [0, 100].
/// Custom and special-date requirements degenerate to 0% or 100%.
pub fn progress(requirement: &Requirement, stats: &UserStats) -> RequirementProgress {
    match counter(requirement, stats) {
        Some((current, target)) => {
            let percentage = if target == 0 {
                100.0
            } else {
                (current as f64 / target as f64 * 100.0).clamp(0.0, 100.0)
            };
            RequirementProgress {
                current,
                target,
                percentage,
            }
        }
        None => {
            let satisfied = is_satisfied(requirement, stats);
            RequirementProgress {
                current: satisfied as u64,
                target: 1,
                percentage: if satisfied { 100.0 } else { 0.0 },
            }
        }
    }
}

/// Catalog entries that are satisfied but not yet unlocked, in
/// catalog order. Does not mutate `stats`; idempotent on an unchanged
/// snapshot.
pub fn detect_newly_unlocked<'a>(
    stats: &UserStats,
    catalog: &'a AchievementCatalog,
) -> Vec<&'a AchievementDefinition> {
    catalog
        .iter()
        .filter(|def| !stats.is_unlocked(&def.id) && is_satisfied(&def.requirement, stats))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::catalog::{AchievementDefinition, Rarity};
    use crate::stats::{ExerciseCategory, Timeframe};

    fn small_catalog() -> AchievementCatalog {
        AchievementCatalog::new(vec![
            AchievementDefinition::new(
                "first_workout",
                "Primer paso",
                "",
                Requirement::TotalWorkouts { value: 1 },
                Rarity::Common,
            ),
            AchievementDefinition::new(
                "strength_3",
                "Fuerza",
                "",
                Requirement::CategoryCount {
                    category: ExerciseCategory::Strength,
                    value: 3,
                },
                Rarity::Common,
            ),
            AchievementDefinition::new(
                "xp_500",
                "Quinientos",
                "",
                Requirement::TotalXp { value: 500 },
                Rarity::Common,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_threshold_comparison_is_gte() {
        let mut stats = UserStats::default();
        stats.total_workouts = 1;
        assert!(is_satisfied(&Requirement::TotalWorkouts { value: 1 }, &stats));
        assert!(!is_satisfied(&Requirement::TotalWorkouts { value: 2 }, &stats));
    }

    #[test]
    fn test_nested_map_lookup_by_qualifier() {
        let mut stats = UserStats::default();
        stats.workouts_by_timeframe.insert(Timeframe::Morning, 5);
        assert!(is_satisfied(
            &Requirement::WorkoutsInTimeframe {
                timeframe: Timeframe::Morning,
                value: 5
            },
            &stats
        ));
        assert!(!is_satisfied(
            &Requirement::WorkoutsInTimeframe {
                timeframe: Timeframe::Night,
                value: 1
            },
            &stats
        ));
    }

    #[test]
    fn test_progress_ratio_and_clamp() {
        let mut stats = UserStats::default();
        stats.total_workouts = 5;

        let p = progress(&Requirement::TotalWorkouts { value: 10 }, &stats);
        assert_eq!(p.current, 5);
        assert_eq!(p.target, 10);
        assert_eq!(p.percentage, 50.0);

        // Overshoot clamps to 100
        let p = progress(&Requirement::TotalWorkouts { value: 2 }, &stats);
        assert_eq!(p.percentage, 100.0);
    }

    #[test]
    fn test_custom_progress_degenerates() {
        let stats = UserStats::default();
        let req = Requirement::Custom {
            predicate: |_| false,
        };
        assert_eq!(progress(&req, &stats).percentage, 0.0);

        let req = Requirement::Custom {
            predicate: |_| true,
        };
        assert_eq!(progress(&req, &stats).percentage, 100.0);
    }

    #[test]
    fn test_special_date_never_satisfied_by_evaluator() {
        let stats = UserStats::default();
        let req = Requirement::SpecialDate {
            moment: crate::special_dates::SpecialMoment::NightOwl,
        };
        assert!(!is_satisfied(&req, &stats));
        assert_eq!(progress(&req, &stats).percentage, 0.0);
    }

    #[test]
    fn test_panicking_predicate_is_isolated() {
        let mut stats = UserStats::default();
        stats.total_workouts = 1;

        let catalog = AchievementCatalog::new(vec![
            AchievementDefinition::new(
                "explodes",
                "Explota",
                "",
                Requirement::Custom {
                    predicate: |_| panic!("broken predicate"),
                },
                Rarity::Common,
            ),
            AchievementDefinition::new(
                "first_workout",
                "Primer paso",
                "",
                Requirement::TotalWorkouts { value: 1 },
                Rarity::Common,
            ),
        ])
        .unwrap();

        let detected = detect_newly_unlocked(&stats, &catalog);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].id, "first_workout");
    }

    #[test]
    fn test_detection_is_idempotent_until_merge() {
        let mut stats = UserStats::default();
        stats.total_workouts = 1;
        stats.workouts_by_category.insert(ExerciseCategory::Strength, 3);
        let catalog = small_catalog();

        let first: Vec<_> = detect_newly_unlocked(&stats, &catalog)
            .iter()
            .map(|d| d.id.clone())
            .collect();
        let second: Vec<_> = detect_newly_unlocked(&stats, &catalog)
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(first, vec!["first_workout", "strength_3"]);
        assert_eq!(first, second);

        // After the caller merges the unlocks, a third run is empty
        for id in &first {
            stats.record_unlock(id, Utc::now());
        }
        assert!(detect_newly_unlocked(&stats, &catalog).is_empty());
    }

    #[test]
    fn test_catalog_order_preserved() {
        let mut stats = UserStats::default();
        stats.total_workouts = 1;
        stats.total_xp = 600;
        stats.workouts_by_category.insert(ExerciseCategory::Strength, 3);

        let ids: Vec<_> = detect_newly_unlocked(&stats, &small_catalog())
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(ids, vec!["first_workout", "strength_3", "xp_500"]);
    }
}
