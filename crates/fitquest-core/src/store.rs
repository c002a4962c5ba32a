//! The achievement/stats store.
//!
//! Owns the load -> mutate -> evaluate -> save cycle for the single
//! `UserStats` aggregate. Each public operation performs exactly one
//! save; the host serializes calls (single device, single session),
//! so there is no locking here.
//!
//! The store never applies achievement XP rewards or detects
//! level-ups: it returns the newly unlocked definitions and the
//! updated aggregate, and the caller awards the rewards through the
//! leveling calculator. This keeps the store free of a dependency
//! cycle on leveling.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::catalog::{AchievementCatalog, AchievementDefinition, Requirement};
use crate::error::{CoreError, Result};
use crate::evaluator;
use crate::special_dates;
use crate::stats::{Season, Timeframe, UserStats, WorkoutEvent};
use crate::storage::KeyValueStore;
use crate::streak;

/// Storage key of the persisted `UserStats` document.
pub const STATS_KEY: &str = "user_stats";

/// Result of one recorded event.
///
/// On save failure the mutated aggregate is still returned -- the
/// durability guarantee is lost until the next successful save, but
/// the celebration flow must not be blocked by a disk error.
#[derive(Debug)]
pub struct WorkoutOutcome {
    /// Newly unlocked achievements, in unlock order. The caller
    /// awards `sum(xp_reward)` via the leveling calculator and
    /// surfaces one celebration per entry.
    pub newly_unlocked: Vec<AchievementDefinition>,
    /// The aggregate after this event.
    pub stats: UserStats,
    /// Set when the final save failed; callers should retry
    /// opportunistically on a later event.
    pub save_error: Option<CoreError>,
}

impl WorkoutOutcome {
    pub fn persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// The stats store, generic over its persistence collaborator.
pub struct StatsStore<K: KeyValueStore> {
    backend: K,
    catalog: AchievementCatalog,
}

impl<K: KeyValueStore> StatsStore<K> {
    pub fn new(backend: K, catalog: AchievementCatalog) -> Self {
        Self { backend, catalog }
    }

    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// Loads the aggregate, falling back to fresh defaults on a
    /// missing key, a load failure, or a corrupt document. Missing
    /// fields in an old-schema document deserialize to safe defaults.
    pub async fn load(&self) -> UserStats {
        let raw = match self.backend.get(STATS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserStats::default(),
            Err(err) => {
                warn!(error = %err, "failed to load stats, starting from defaults");
                return UserStats::default();
            }
        };

        match serde_json::from_str::<UserStats>(&raw) {
            Ok(mut stats) => {
                stats.normalize();
                stats
            }
            Err(err) => {
                warn!(error = %err, "corrupt stats document, starting from defaults");
                UserStats::default()
            }
        }
    }

    async fn save(&self, stats: &UserStats) -> Result<()> {
        let raw = serde_json::to_string(stats)?;
        self.backend.set(STATS_KEY, &raw).await?;
        Ok(())
    }

    /// Records a completed workout: folds the event into the
    /// aggregate, runs streak and special-date logic, evaluates the
    /// catalog, and persists once.
    pub async fn record_workout(&self, event: WorkoutEvent) -> WorkoutOutcome {
        let mut stats = self.load().await;

        let at = event.effective_at();
        let today = at.date_naive();

        // Gap must be read off the previous last_workout_at before it
        // is overwritten below.
        if let Some(previous) = stats.last_workout_at {
            let gap = streak::gap_days(previous, at);
            if gap > 0 && gap as u32 > stats.longest_comeback_gap_days {
                stats.longest_comeback_gap_days = gap as u32;
            }
        }

        stats.total_xp += event.xp_earned;
        stats.total_workouts += 1;
        stats.total_minutes += event.duration_minutes as u64;
        if event.duration_minutes > stats.longest_workout_minutes {
            stats.longest_workout_minutes = event.duration_minutes;
        }

        let transition =
            streak::evaluate_day(stats.current_streak, stats.last_counted_date, today, &event.goals);
        stats.apply_streak(transition, today);
        stats.last_workout_at = Some(at);

        *stats
            .workouts_by_timeframe
            .entry(Timeframe::of(at))
            .or_insert(0) += 1;
        for category in &event.categories {
            *stats.workouts_by_category.entry(*category).or_insert(0) += 1;
        }
        *stats
            .workouts_by_season
            .entry(Season::of(today))
            .or_insert(0) += 1;
        *stats
            .workouts_by_intensity
            .entry(event.intensity)
            .or_insert(0) += 1;
        if event.perfect_form {
            stats.perfect_form_count += 1;
        }
        if event.personal_record {
            stats.personal_record_count += 1;
        }

        stats.merge_exercises(event.exercise_ids.iter().cloned());

        let mut newly_unlocked = Vec::new();

        // Special dates first, so meta-achievements counting unlocks
        // see them in the same evaluation pass.
        let moments = special_dates::detect(at, event.birthday);
        if !moments.is_empty() {
            for def in self.catalog.iter() {
                if let Requirement::SpecialDate { moment } = &def.requirement {
                    if moments.contains(moment) && stats.record_unlock(&def.id, at) {
                        debug!(id = %def.id, "special-date achievement unlocked");
                        newly_unlocked.push(def.clone());
                    }
                }
            }
        }

        for def in evaluator::detect_newly_unlocked(&stats, &self.catalog) {
            if stats.record_unlock(&def.id, at) {
                newly_unlocked.push(def.clone());
            }
        }

        self.finish(stats, newly_unlocked).await
    }

    /// Records a shared workout: bumps the share counter, evaluates,
    /// persists once.
    pub async fn record_share(&self) -> WorkoutOutcome {
        let mut stats = self.load().await;
        let at = Utc::now();

        stats.share_count += 1;

        let mut newly_unlocked = Vec::new();
        for def in evaluator::detect_newly_unlocked(&stats, &self.catalog) {
            if stats.record_unlock(&def.id, at) {
                newly_unlocked.push(def.clone());
            }
        }

        self.finish(stats, newly_unlocked).await
    }

    /// Unlocks an achievement without evaluation (backfill and
    /// migration). Returns false when it was already unlocked.
    pub async fn unlock_manually(&self, id: &str, at: DateTime<Utc>) -> Result<bool> {
        if self.catalog.get(id).is_none() {
            return Err(CoreError::UnknownAchievement(id.to_string()));
        }

        let mut stats = self.load().await;
        if !stats.record_unlock(id, at) {
            return Ok(false);
        }
        self.save(&stats).await?;
        Ok(true)
    }

    async fn finish(
        &self,
        stats: UserStats,
        newly_unlocked: Vec<AchievementDefinition>,
    ) -> WorkoutOutcome {
        let save_error = match self.save(&stats).await {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, "failed to persist stats; returning in-memory state");
                Some(err)
            }
        };

        WorkoutOutcome {
            newly_unlocked,
            stats,
            save_error,
        }
    }
}
