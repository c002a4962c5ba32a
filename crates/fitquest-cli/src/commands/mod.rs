pub mod achievements;
pub mod share;
pub mod stats;
pub mod workout;

use fitquest_core::{catalog, JsonFileStore, StatsStore, WorkoutOutcome};

/// Opens the stats store over the file backend in the data directory.
pub fn open_store() -> Result<StatsStore<JsonFileStore>, Box<dyn std::error::Error>> {
    Ok(StatsStore::new(JsonFileStore::open()?, catalog::builtin()))
}

/// Prints the celebration lines for one recorded event.
pub fn print_outcome(outcome: &WorkoutOutcome) {
    for def in &outcome.newly_unlocked {
        println!(
            "🏆 {} -- {} (+{} XP)",
            def.name, def.description, def.xp_reward
        );
    }

    if let Some(err) = &outcome.save_error {
        eprintln!("warning: stats not persisted, will retry on the next event: {err}");
    }
}
