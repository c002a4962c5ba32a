use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fitquest-cli", version, about = "Fitquest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record activity events
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Record a shared workout
    Share,
    /// Stats and progression
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Achievement catalog and unlocks
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Workout { action } => commands::workout::run(action).await,
        Commands::Share => commands::share::run().await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Achievements { action } => commands::achievements::run(action).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
