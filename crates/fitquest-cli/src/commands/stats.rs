use clap::Subcommand;
use fitquest_core::leveling;
use serde::Serialize;

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Full stats document
    Show,
    /// Level and XP progression
    Level,
}

#[derive(Serialize)]
struct LevelView {
    level: u32,
    title: &'static str,
    xp_into_level: u64,
    xp_for_next_level: u64,
    percentage: f64,
    total_xp: u64,
    rewards: Vec<leveling::LevelReward>,
}

pub async fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let stats = store.load().await;

    match action {
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Level => {
            let progress = leveling::level_for_total_xp(stats.total_xp);
            let view = LevelView {
                level: progress.level,
                title: leveling::level_title(progress.level),
                xp_into_level: progress.xp_into_level,
                xp_for_next_level: progress.xp_for_next_level,
                percentage: progress.percentage(),
                total_xp: stats.total_xp,
                rewards: leveling::level_rewards(progress.level),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}
