use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use fitquest_core::{leveling, DailyGoals, ExerciseCategory, Intensity, WorkoutEvent};

use super::{open_store, print_outcome};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Log a completed workout
    Log {
        /// XP earned by the workout
        #[arg(long, default_value_t = 50)]
        xp: u64,
        /// Exercise ids, comma separated
        #[arg(long, value_delimiter = ',')]
        exercises: Vec<String>,
        /// Exercise categories, comma separated
        /// (strength, cardio, flexibility, core, full_body)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<ExerciseCategory>,
        /// Duration in minutes
        #[arg(long, default_value_t = 30)]
        minutes: u32,
        /// Intensity (low, medium, high, extreme)
        #[arg(long, default_value = "medium")]
        intensity: Intensity,
        #[arg(long)]
        perfect_form: bool,
        #[arg(long)]
        personal_record: bool,
        /// Explicit completion timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Birthday, for special-date achievements (YYYY-MM-DD)
        #[arg(long)]
        birthday: Option<NaiveDate>,
        /// Daily goal signals from other trackers
        #[arg(long)]
        steps_goal_met: bool,
        #[arg(long)]
        water_goal_met: bool,
        #[arg(long)]
        sleep_goal_met: bool,
    },
}

pub async fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkoutAction::Log {
            xp,
            exercises,
            categories,
            minutes,
            intensity,
            perfect_form,
            personal_record,
            at,
            birthday,
            steps_goal_met,
            water_goal_met,
            sleep_goal_met,
        } => {
            let mut event = WorkoutEvent::new(xp)
                .with_exercises(exercises)
                .with_categories(categories)
                .lasting(minutes)
                .with_intensity(intensity)
                .with_goals(DailyGoals {
                    steps_goal_met,
                    water_goal_met,
                    sleep_goal_met,
                    mission_completed: true,
                });
            if perfect_form {
                event = event.perfect_form();
            }
            if personal_record {
                event = event.personal_record();
            }
            if let Some(at) = at {
                event = event.at(at);
            }
            if let Some(birthday) = birthday {
                event = event.with_birthday(birthday);
            }

            let store = open_store()?;
            let outcome = store.record_workout(event).await;
            print_outcome(&outcome);

            let progress = leveling::level_for_total_xp(outcome.stats.total_xp);
            println!(
                "Nivel {} ({}) -- {}/{} XP, racha {} días",
                progress.level,
                leveling::level_title(progress.level),
                progress.xp_into_level,
                progress.xp_for_next_level,
                outcome.stats.current_streak,
            );
            Ok(())
        }
    }
}
