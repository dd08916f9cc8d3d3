//! Shared test utilities for `HabitBuddy`.
//!
//! This module provides common helper functions for setting up temporary
//! stores and creating test habits and entries with sensible defaults.

use crate::{
    core::{daily_log, habit},
    entities::{AutomaticRule, Habit, HabitEntry, HabitKind},
    errors::Result,
    store::Store,
};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Creates a store rooted in a fresh temporary directory.
/// Keep the returned `TempDir` alive for as long as the store is used.
pub async fn setup_test_store() -> Result<(TempDir, Store)> {
    let dir = tempfile::tempdir()?;
    let store = Store::open(dir.path()).await?;
    Ok((dir, store))
}

/// Creates a test habit with sensible defaults.
///
/// # Arguments
/// * `store` - Store handle
/// * `name` - Habit name
///
/// # Defaults
/// * `kind`: [`HabitKind::Simple`]
/// * `color`: `"#4a90d9"`
/// * no weather gating, no backup habit
pub async fn create_test_habit(store: &Store, name: &str) -> Result<Habit> {
    habit::create_habit(
        store,
        name.to_string(),
        HabitKind::Simple,
        "#4a90d9".to_string(),
        false, // weather_dependent
        Vec::new(),
        None, // backup_habit_name
    )
    .await
}

/// Creates a test habit with a custom kind.
/// Use this when the completion mode matters to the test.
pub async fn create_custom_habit(store: &Store, name: &str, kind: HabitKind) -> Result<Habit> {
    habit::create_habit(
        store,
        name.to_string(),
        kind,
        "#4a90d9".to_string(),
        false,
        Vec::new(),
        None,
    )
    .await
}

/// Creates a step-target automatic habit for evaluator tests.
pub async fn create_automatic_habit(store: &Store, name: &str) -> Result<Habit> {
    create_custom_habit(store, name, HabitKind::Automatic(AutomaticRule::StepTarget)).await
}

/// Records a bare completed/not-completed entry for a habit on a date.
///
/// Quantity and note are left unset; use
/// [`daily_log::update_habit_entry`] directly when they matter.
pub async fn log_entry(
    store: &Store,
    habit_id: &str,
    date: NaiveDate,
    completed: bool,
) -> Result<HabitEntry> {
    daily_log::update_habit_entry(store, date, habit_id, completed, None, None).await
}

/// Builds a `NaiveDate` from literals.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Sets up a store with a single simple habit.
/// Returns (dir, store, habit) for common test scenarios.
pub async fn setup_with_habit() -> Result<(TempDir, Store, Habit)> {
    let (dir, store) = setup_test_store().await?;
    let habit = create_test_habit(&store, "Test Habit").await?;
    Ok((dir, store, habit))
}
