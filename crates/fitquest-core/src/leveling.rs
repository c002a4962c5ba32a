//! Experience and level progression.
//!
//! Levels follow an exponential soft curve: each level costs 50% more
//! XP than the previous one, so early levels come quickly and late
//! levels take sustained training. The calculator is pure -- it owns
//! no state and emits no events. Detecting a level-up (and celebrating
//! it) is the caller's job, by comparing levels before and after.

use serde::{Deserialize, Serialize};

/// XP cost of the very first level.
pub const BASE_XP: u64 = 100;

/// Per-level cost multiplier.
pub const GROWTH_RATE: f64 = 1.5;

/// Where a user sits on the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level (1-based)
    pub level: u32,
    /// XP accumulated toward the next level
    pub xp_into_level: u64,
    /// XP required to finish the current level
    pub xp_for_next_level: u64,
}

impl LevelProgress {
    /// Fraction of the current level completed, in [0, 100].
    pub fn percentage(&self) -> f64 {
        if self.xp_for_next_level == 0 {
            return 0.0;
        }
        (self.xp_into_level as f64 / self.xp_for_next_level as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// XP required to complete `level` and reach `level + 1`.
///
/// `floor(100 * 1.5^(level - 1))`, strictly increasing. Levels below 1
/// are treated as level 1.
pub fn xp_required_for_level(level: u32) -> u64 {
    let level = level.max(1);
    (BASE_XP as f64 * GROWTH_RATE.powi(level as i32 - 1)).floor() as u64
}

/// Applies an XP gain, carrying overflow across as many level-ups as
/// the amount covers.
///
/// Conserves XP exactly: the XP spent on completed levels plus
/// `xp_into_level` of the result equals `current_xp + amount`.
/// `amount` is unsigned because XP gains are never negative.
pub fn apply_xp_gain(current_xp: u64, current_level: u32, amount: u64) -> LevelProgress {
    let mut level = current_level.max(1);
    let mut remaining = current_xp + amount;

    while remaining >= xp_required_for_level(level) {
        remaining -= xp_required_for_level(level);
        level += 1;
    }

    LevelProgress {
        level,
        xp_into_level: remaining,
        xp_for_next_level: xp_required_for_level(level),
    }
}

/// Derives the level reached by a cumulative XP total, replaying the
/// curve from level 1. Hosts persist only the total; the level is
/// always derived.
pub fn level_for_total_xp(total_xp: u64) -> LevelProgress {
    apply_xp_gain(0, 1, total_xp)
}

/// Display title for a level, by threshold.
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Novato",
        5..=9 => "Aprendiz",
        10..=19 => "Atleta",
        20..=29 => "Veterano",
        30..=49 => "Maestro",
        _ => "Leyenda",
    }
}

/// A reward granted upon reaching a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LevelReward {
    /// A new display title became available
    Title { title: String },
    /// Milestone badge, granted every 5 levels
    MilestoneBadge { level: u32 },
}

/// Rewards granted when `level` is reached. Deterministic: a title
/// reward on title-threshold boundaries, a badge on every 5th level.
pub fn level_rewards(level: u32) -> Vec<LevelReward> {
    let mut rewards = Vec::new();

    if level > 1 && level_title(level) != level_title(level - 1) {
        rewards.push(LevelReward::Title {
            title: level_title(level).to_string(),
        });
    }

    if level > 0 && level % 5 == 0 {
        rewards.push(LevelReward::MilestoneBadge { level });
    }

    rewards
}
