//! Configuration management for the store location and habit seeds.
//!
//! Settings resolve from environment variables with local defaults so the
//! app runs with no environment at all: `HABIT_BUDDY_DATA_DIR` selects the
//! store directory and `HABIT_BUDDY_CONFIG` the seed file location.

/// Habit seed definitions loaded from config.toml
pub mod habits;

use crate::errors::Result;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_DATA_DIR: &str = "data/habit_buddy";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Application settings resolved at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Habit seeds parsed from the TOML config file
    pub seed_habits: Vec<habits::HabitSeed>,
}

/// Resolves the application configuration from the environment and the seed
/// config file.
///
/// A missing seed file is not an error; it just means nothing gets seeded.
/// A seed file that exists but does not parse is an error.
///
/// # Errors
/// Fails when the seed file exists but cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let data_dir = std::env::var("HABIT_BUDDY_DATA_DIR")
        .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
    let config_path = std::env::var("HABIT_BUDDY_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    debug!(
        "Resolved data dir {:?}, seed config path {:?}",
        data_dir, config_path
    );

    let seed_habits = if config_path.exists() {
        habits::load_config(&config_path)?.habits
    } else {
        debug!("No seed config at {:?}, skipping habit seeds", config_path);
        Vec::new()
    };

    Ok(AppConfig {
        data_dir,
        seed_habits,
    })
}
