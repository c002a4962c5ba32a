use chrono::Utc;
use clap::Subcommand;
use fitquest_core::evaluator;

use super::open_store;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List the catalog with unlock state and progress
    List {
        /// Include secret achievements that are still locked
        #[arg(long)]
        all: bool,
    },
    /// Unlock an achievement without evaluation (backfill)
    Unlock { id: String },
}

pub async fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;

    match action {
        AchievementsAction::List { all } => {
            let stats = store.load().await;
            for def in store.catalog().iter() {
                let unlocked = stats.is_unlocked(&def.id);
                if def.secret && !unlocked && !all {
                    continue;
                }

                let marker = if unlocked { "x" } else { " " };
                let progress = evaluator::progress(&def.requirement, &stats);
                println!(
                    "[{marker}] {:<18} {} -- {} ({:.0}%)",
                    def.id, def.name, def.description, progress.percentage
                );
            }
        }
        AchievementsAction::Unlock { id } => {
            if store.unlock_manually(&id, Utc::now()).await? {
                println!("Unlocked: {id}");
            } else {
                println!("Already unlocked: {id}");
            }
        }
    }
    Ok(())
}
