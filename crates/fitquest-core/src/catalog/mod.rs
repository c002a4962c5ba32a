//! Achievement definitions and the static catalog.
//!
//! The catalog is loaded once at startup and read-only afterwards.
//! Requirements form a closed tagged union of counter-threshold
//! kinds, a point-in-time special-date family, and a custom-predicate
//! escape hatch for conditions that are not simple monotone counters.

mod definitions;

pub use definitions::builtin;

use std::collections::HashMap;

use crate::error::CatalogError;
use crate::special_dates::SpecialMoment;
use crate::stats::{ExerciseCategory, Intensity, Season, Timeframe, UserStats};

/// A pure predicate over the stats snapshot. Must read only the
/// passed aggregate so it can be unit-tested independently.
pub type StatsPredicate = fn(&UserStats) -> bool;

/// The evaluable condition attached to an achievement.
#[derive(Debug, Clone)]
pub enum Requirement {
    /// Workouts completed in a time-of-day bucket
    WorkoutsInTimeframe { timeframe: Timeframe, value: u32 },
    /// Cumulative XP earned
    TotalXp { value: u64 },
    /// Live streak of qualifying days
    ConsecutiveDays { value: u32 },
    /// Workouts completed in an exercise category
    CategoryCount {
        category: ExerciseCategory,
        value: u32,
    },
    /// Distinct exercises ever completed
    UniqueExercises { value: u32 },
    /// Total workouts completed
    TotalWorkouts { value: u32 },
    /// A single workout of at least this many minutes
    SingleWorkoutDuration { minutes: u32 },
    /// Workouts shared
    ShareCount { value: u32 },
    /// Workouts completed with perfect form
    PerfectFormCount { value: u32 },
    /// Returned after an inactivity gap of at least this many days
    ComebackGap { days: u32 },
    /// Personal records set
    PersonalRecordCount { value: u32 },
    /// Distinct exercise categories ever trained
    VarietyStreak { value: u32 },
    /// Workouts completed in a season
    SeasonalCount { season: Season, value: u32 },
    /// Workouts completed at an intensity level
    IntensityCount { intensity: Intensity, value: u32 },
    /// Achievements already unlocked (meta)
    AchievementsUnlocked { value: u32 },
    /// Unlocked by the special-date detector at event time, never by
    /// the general evaluator
    SpecialDate { moment: SpecialMoment },
    /// Arbitrary pure predicate over the stats snapshot
    Custom { predicate: StatsPredicate },
}

/// Rarity tier of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Default XP reward for the tier.
    pub fn base_xp_reward(&self) -> u64 {
        match self {
            Rarity::Common => 25,
            Rarity::Rare => 75,
            Rarity::Epic => 200,
            Rarity::Legendary => 500,
        }
    }
}

/// One catalog entry: identity, display copy, the requirement, and
/// the one-time XP reward.
#[derive(Debug, Clone)]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirement: Requirement,
    pub xp_reward: u64,
    pub rarity: Rarity,
    /// Shown greyed-out but with its description visible
    pub hidden: bool,
    /// Not shown at all until unlocked
    pub secret: bool,
}

impl AchievementDefinition {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        requirement: Requirement,
        rarity: Rarity,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            requirement,
            xp_reward: rarity.base_xp_reward(),
            rarity,
            hidden: false,
            secret: false,
        }
    }

    /// Override the tier's default XP reward.
    pub fn rewarding(mut self, xp: u64) -> Self {
        self.xp_reward = xp;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// The immutable achievement catalog. Ids are unique; iteration
/// follows definition order.
pub struct AchievementCatalog {
    definitions: Vec<AchievementDefinition>,
    by_id: HashMap<String, usize>,
}

impl AchievementCatalog {
    /// Builds a catalog, rejecting duplicate ids and empty ids.
    pub fn new(definitions: Vec<AchievementDefinition>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(definitions.len());
        for (index, def) in definitions.iter().enumerate() {
            if def.id.is_empty() {
                return Err(CatalogError::InvalidDefinition {
                    id: def.id.clone(),
                    message: "empty id".to_string(),
                });
            }
            if by_id.insert(def.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
        }
        Ok(Self { definitions, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.by_id.get(id).map(|i| &self.definitions[*i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AchievementDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let defs = vec![
            AchievementDefinition::new(
                "first",
                "Primero",
                "",
                Requirement::TotalWorkouts { value: 1 },
                Rarity::Common,
            ),
            AchievementDefinition::new(
                "first",
                "Repetido",
                "",
                Requirement::TotalWorkouts { value: 2 },
                Rarity::Common,
            ),
        ];
        assert!(matches!(
            AchievementCatalog::new(defs),
            Err(CatalogError::DuplicateId(id)) if id == "first"
        ));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = AchievementCatalog::new(vec![AchievementDefinition::new(
            "first",
            "Primero",
            "",
            Requirement::TotalWorkouts { value: 1 },
            Rarity::Common,
        )])
        .unwrap();
        assert!(catalog.get("first").is_some());
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_rarity_reward_and_override() {
        let def = AchievementDefinition::new(
            "a",
            "A",
            "",
            Requirement::TotalWorkouts { value: 1 },
            Rarity::Epic,
        );
        assert_eq!(def.xp_reward, 200);
        assert_eq!(def.rewarding(350).xp_reward, 350);
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin();
        assert!(catalog.len() >= 30);
        assert!(catalog.get("streak_3").is_some());
        assert!(catalog.get("comeback_30").is_some());
    }
}
