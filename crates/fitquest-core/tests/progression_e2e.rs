//! End-to-end progression flow against the in-memory backend.
//!
//! Exercises the full caller contract: record events through the
//! store, then award XP and detect level-ups through the leveling
//! calculator, the way a UI host would.

use chrono::{DateTime, Utc};
use fitquest_core::{catalog, leveling, StatsStore, WorkoutEvent};
use fitquest_core::{ExerciseCategory, MemoryStore};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn store() -> StatsStore<MemoryStore> {
    StatsStore::new(MemoryStore::new(), catalog::builtin())
}

#[tokio::test]
async fn third_consecutive_day_unlocks_streak_and_levels_up() {
    let store = store();

    // Two prior qualifying days
    store
        .record_workout(WorkoutEvent::new(40).at(at("2025-01-04T18:00:00Z")))
        .await;
    store
        .record_workout(WorkoutEvent::new(40).at(at("2025-01-05T18:00:00Z")))
        .await;

    // Third consecutive day: 120 XP, strength
    let outcome = store
        .record_workout(
            WorkoutEvent::new(120)
                .with_categories([ExerciseCategory::Strength])
                .at(at("2025-01-06T18:00:00Z")),
        )
        .await;

    assert!(outcome.persisted());
    assert_eq!(outcome.stats.current_streak, 3);

    let streak_3 = outcome
        .newly_unlocked
        .iter()
        .find(|d| d.id == "streak_3")
        .expect("streak_3 should unlock on the third consecutive day");
    assert_eq!(streak_3.description, "Entrena 3 días consecutivos");
    assert!(streak_3.xp_reward > 0);

    // Caller side: a user at level 1 with 0 XP into the level gains
    // the workout's 120 XP -> level 2 with 20 XP remaining.
    let progress = leveling::apply_xp_gain(0, 1, 120);
    assert_eq!(progress.level, 2);
    assert_eq!(progress.xp_into_level, 20);

    // The achievement reward is pending award, also via the
    // calculator, after the celebration.
    let pending: u64 = outcome.newly_unlocked.iter().map(|d| d.xp_reward).sum();
    let after_rewards =
        leveling::apply_xp_gain(progress.xp_into_level, progress.level, pending);
    assert!(after_rewards.level >= progress.level);
}

#[tokio::test]
async fn streak_break_resets_then_rebuilds() {
    let store = store();

    for day in ["2025-01-01", "2025-01-02", "2025-01-03"] {
        store
            .record_workout(WorkoutEvent::new(10).at(at(&format!("{day}T18:00:00Z"))))
            .await;
    }
    let stats = store.load().await;
    assert_eq!(stats.current_streak, 3);

    // Nine-day gap: streak restarts at 1, longest is preserved
    let outcome = store
        .record_workout(WorkoutEvent::new(10).at(at("2025-01-12T18:00:00Z")))
        .await;
    assert_eq!(outcome.stats.current_streak, 1);
    assert_eq!(outcome.stats.longest_streak, 3);
}

#[tokio::test]
async fn stats_survive_reload_with_dates_parsed_back() {
    let backend = MemoryStore::new();
    {
        let store = StatsStore::new(backend.clone(), catalog::builtin());
        store
            .record_workout(
                WorkoutEvent::new(75)
                    .with_exercises(["squat", "plank"])
                    .at(at("2025-06-15T07:30:00Z")),
            )
            .await;
    }

    // Fresh store over the same backend: the document parses back
    // with real date values, not strings.
    let store = StatsStore::new(backend, catalog::builtin());
    let stats = store.load().await;
    assert_eq!(stats.total_xp, 75);
    assert_eq!(stats.last_counted_date, Some("2025-06-15".parse().unwrap()));
    assert_eq!(
        stats.last_workout_at,
        Some(at("2025-06-15T07:30:00Z"))
    );
    assert_eq!(stats.unique_exercises.len(), 2);
}

#[tokio::test]
async fn repeated_evaluation_of_same_day_is_a_noop_for_the_streak() {
    let store = store();
    store
        .record_workout(WorkoutEvent::new(10).at(at("2025-01-06T08:00:00Z")))
        .await;
    let outcome = store
        .record_workout(WorkoutEvent::new(10).at(at("2025-01-06T20:00:00Z")))
        .await;

    assert_eq!(outcome.stats.current_streak, 1);
    assert_eq!(outcome.stats.total_workouts, 2);
}
