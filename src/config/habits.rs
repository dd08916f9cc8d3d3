//! Habit seed configuration loading from config.toml
//!
//! This module provides functionality to load initial habit definitions from
//! a TOML configuration file. The habits defined in config.toml are used to
//! seed the store on first run or when habits are missing.

use crate::entities::{AutomaticRule, HabitKind};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct SeedConfig {
    /// List of habit seeds to insert when missing
    #[serde(default)]
    pub habits: Vec<HabitSeed>,
}

/// Completion mode of a seeded habit as spelled in the TOML file
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    /// Plain yes/no habit
    Simple,
    /// Habit tracked with a numeric amount
    Quantity,
    /// Automatic habit completed by the daily step target
    StepTarget,
}

impl From<SeedKind> for HabitKind {
    fn from(kind: SeedKind) -> Self {
        match kind {
            SeedKind::Simple => Self::Simple,
            SeedKind::Quantity => Self::Quantity,
            SeedKind::StepTarget => Self::Automatic(AutomaticRule::StepTarget),
        }
    }
}

/// Configuration for a single seeded habit
#[derive(Debug, Deserialize, Clone)]
pub struct HabitSeed {
    /// Name of the habit
    pub name: String,
    /// Completion mode
    pub kind: SeedKind,
    /// Display color token
    pub color: String,
    /// Whether the notification layer weather-gates this habit
    #[serde(default)]
    pub weather_dependent: bool,
    /// Weather types under which the habit applies
    #[serde(default)]
    pub required_weather_types: Vec<String>,
    /// Fallback habit suggested when the weather gate fails
    #[serde(default)]
    pub backup_habit_name: Option<String>,
}

/// Loads seed configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(SeedConfig)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml)
///
/// # Errors
/// Same conditions as [`load_config`].
pub fn load_default_config() -> Result<SeedConfig> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_habit_seeds() {
        // The color values contain `"#`, so the raw string needs the wider
        // delimiter.
        let toml_str = r##"
            [[habits]]
            name = "Morning stretch"
            kind = "simple"
            color = "#7bd389"

            [[habits]]
            name = "Read pages"
            kind = "quantity"
            color = "#f2a65a"

            [[habits]]
            name = "Run outside"
            kind = "simple"
            color = "#e4572e"
            weather_dependent = true
            required_weather_types = ["clear", "clouds"]
            backup_habit_name = "Indoor workout"
        "##;

        let config: SeedConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.habits.len(), 3);
        assert_eq!(config.habits[0].name, "Morning stretch");
        assert_eq!(config.habits[0].kind, SeedKind::Simple);
        assert!(!config.habits[0].weather_dependent);

        assert_eq!(config.habits[1].kind, SeedKind::Quantity);

        assert!(config.habits[2].weather_dependent);
        assert_eq!(config.habits[2].required_weather_types.len(), 2);
        assert_eq!(
            config.habits[2].backup_habit_name.as_deref(),
            Some("Indoor workout")
        );
    }

    #[test]
    fn test_parse_step_target_seed() {
        let toml_str = r##"
            [[habits]]
            name = "Walk 10k steps"
            kind = "step_target"
            color = "#4a90d9"
        "##;

        let config: SeedConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.habits[0].kind, SeedKind::StepTarget);
        assert_eq!(
            HabitKind::from(config.habits[0].kind),
            HabitKind::Automatic(AutomaticRule::StepTarget)
        );
    }

    #[test]
    fn test_empty_config_has_no_seeds() {
        let config: SeedConfig = toml::from_str("").unwrap();
        assert!(config.habits.is_empty());
    }
}
