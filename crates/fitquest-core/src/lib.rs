//! # Fitquest Core Library
//!
//! Core progression and achievement engine for the Fitquest fitness
//! app. It turns raw activity events (workouts completed, shares,
//! daily goal signals) into persistent progression state: experience
//! points, levels, day-streaks, and catalog-driven achievement
//! unlocks. The CLI binary and any GUI layer are thin shells over
//! this library.
//!
//! ## Architecture
//!
//! - **Leveling**: pure exponential XP curve with overflow-carry
//!   across multi-level gains
//! - **Streaks**: pure date arithmetic with continue/reset/comeback
//!   semantics over daily goal signals
//! - **Evaluator**: rule interpreter over a closed set of requirement
//!   kinds plus a custom-predicate escape hatch
//! - **Store**: owns the load -> mutate -> evaluate -> save cycle of
//!   the single `UserStats` aggregate against a key-value backend
//! - **Special dates**: point-in-time calendar coincidences captured
//!   at event time
//!
//! ## Key Components
//!
//! - [`StatsStore`]: the single writer of [`UserStats`]
//! - [`AchievementCatalog`]: static, immutable unlock conditions
//! - [`leveling::apply_xp_gain`]: XP-to-level conversion
//! - [`streak::evaluate_day`]: day-streak transition function

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod leveling;
pub mod special_dates;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;

pub use catalog::{AchievementCatalog, AchievementDefinition, Rarity, Requirement};
pub use error::{CatalogError, CoreError, PersistenceError, Result};
pub use evaluator::RequirementProgress;
pub use leveling::LevelProgress;
pub use special_dates::SpecialMoment;
pub use stats::{
    ExerciseCategory, Intensity, Season, Timeframe, UnlockedAchievement, UserStats, WorkoutEvent,
};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{StatsStore, WorkoutOutcome, STATS_KEY};
pub use streak::{DailyGoals, StreakTransition};
