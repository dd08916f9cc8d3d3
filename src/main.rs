//! Daily runner for `HabitBuddy`.
//!
//! Opens the store, seeds configured habits, evaluates automatic habits for
//! today against the health provider, and logs streak statistics for every
//! active habit. Designed to run from a scheduler (cron, launchd) once a day.

use chrono::{NaiveDate, Utc};
use dotenvy::dotenv;
use habit_buddy::config;
use habit_buddy::core::{automatic, habit, stats};
use habit_buddy::errors::{Error, Result};
use habit_buddy::store::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Health provider for the runner: takes today's step count from the
/// `HABIT_BUDDY_STEPS` environment variable when a sync script has set it,
/// and reports no data otherwise.
struct EnvStepsProvider;

impl automatic::HealthMetricProvider for EnvStepsProvider {
    async fn fetch(&self, _date: NaiveDate) -> Result<Option<automatic::HealthSnapshot>> {
        match std::env::var("HABIT_BUDDY_STEPS") {
            Ok(raw) => {
                let steps = raw.trim().parse::<u64>().map_err(|e| Error::HealthData {
                    message: format!("HABIT_BUDDY_STEPS is not a step count: {e}"),
                })?;
                Ok(Some(automatic::HealthSnapshot { steps: Some(steps) }))
            }
            Err(_) => Ok(None),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Open the store
    let store = Store::open(app_config.data_dir.clone())
        .await
        .inspect(|_| info!("Store opened successfully."))
        .inspect_err(|e| error!("Failed to open store: {e}"))?;

    // 5. Seed configured habits (if necessary)
    let seeded = habit::seed_initial_habits(&store, &app_config.seed_habits)
        .await
        .inspect_err(|e| error!("Failed to seed habits: {e}"))?;
    info!("Seeded {seeded} habits from configuration.");

    // 6. Evaluate automatic habits for today
    let today = Utc::now().date_naive();
    let habits = habit::load_active_habits(&store).await;
    info!("Loaded {} active habits.", habits.len());

    let summary =
        automatic::check_automatic_habits(&store, &EnvStepsProvider, today, &habits).await;
    info!("\n{}", automatic::format_check_summary(&summary));

    // 7. Report streak statistics for every active habit
    for habit in &habits {
        let habit_stats = stats::calculate_habit_stats(&store, &habit.id).await;
        info!(
            "{}: current streak {}, longest {}, {} days logged",
            habit.name,
            habit_stats.current_streak,
            habit_stats.longest_streak,
            habit_stats.total_days
        );
    }

    Ok(())
}
