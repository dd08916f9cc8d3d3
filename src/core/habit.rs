//! Habit business logic - Handles all habit-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! habits. All functions are async and operate on the shared store handle;
//! mutating operations hold the habit collection lock across their whole
//! read-modify-write cycle.

use crate::{
    config::habits::HabitSeed,
    entities::{Habit, HabitKind},
    errors::{Error, Result},
    store::Store,
};
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Field subset accepted by [`update_habit`].
///
/// `None` leaves the stored value unchanged; `Some` overwrites it. The
/// double option on `backup_habit_name` distinguishes "leave alone" from
/// "clear the fallback".
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    /// New display name, trimmed and rejected when empty
    pub name: Option<String>,
    /// New completion kind
    pub kind: Option<HabitKind>,
    /// New display color
    pub color: Option<String>,
    /// Archive or unarchive the habit
    pub archived: Option<bool>,
    /// Toggle weather gating
    pub weather_dependent: Option<bool>,
    /// Replace the accepted weather types
    pub required_weather_types: Option<Vec<String>>,
    /// Replace or clear the fallback habit name
    pub backup_habit_name: Option<Option<String>>,
}

/// Retrieves every stored habit, archived ones included.
///
/// Reads fail soft: a missing or corrupt habit collection yields an empty
/// list rather than an error, so callers can always render something.
pub async fn load_habits(store: &Store) -> Vec<Habit> {
    store.read_habits().await
}

/// Retrieves all non-archived habits, the usual feed for lists and
/// new-entry prompts.
pub async fn load_active_habits(store: &Store) -> Vec<Habit> {
    load_habits(store)
        .await
        .into_iter()
        .filter(|habit| !habit.archived)
        .collect()
}

/// Creates a new habit with the specified parameters, performing input
/// validation.
///
/// The repository issues the identifier (a fresh UUID) and the creation
/// timestamp itself, so habit IDs are unique by construction. The name is
/// trimmed and must not be empty.
///
/// # Errors
/// Returns [`Error::InvalidHabit`] for an empty name, or a store error when
/// the collection cannot be persisted.
#[instrument(skip(store, color, required_weather_types, backup_habit_name))]
pub async fn create_habit(
    store: &Store,
    name: String,
    kind: HabitKind,
    color: String,
    weather_dependent: bool,
    required_weather_types: Vec<String>,
    backup_habit_name: Option<String>,
) -> Result<Habit> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::InvalidHabit {
            message: "Habit name cannot be empty".to_string(),
        });
    }

    let habit = Habit {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        kind,
        color,
        created_at: Utc::now().to_rfc3339(),
        archived: false,
        weather_dependent,
        required_weather_types,
        backup_habit_name,
    };

    let _guard = store.lock_habits().await;
    let mut habits = store.read_habits().await;
    habits.push(habit.clone());
    store.write_habits(&habits).await?;

    info!("Created habit '{}' ({})", habit.name, habit.id);
    Ok(habit)
}

/// Applies a partial update to the habit with `id`.
///
/// Supplied fields overwrite the stored values and everything else is kept.
/// A supplied name goes through the same trim-and-reject-empty validation as
/// [`create_habit`]. Updating an unknown id is a silent no-op, so stale
/// references held by long-lived screens degrade without surfacing errors.
///
/// # Errors
/// Returns [`Error::InvalidHabit`] for an empty name, or a store error when
/// the updated collection cannot be persisted.
#[instrument(skip(store, update))]
pub async fn update_habit(store: &Store, id: &str, update: HabitUpdate) -> Result<()> {
    // Validate inputs
    if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(Error::InvalidHabit {
            message: "Habit name cannot be empty".to_string(),
        });
    }

    let _guard = store.lock_habits().await;
    let mut habits = store.read_habits().await;

    let Some(habit) = habits.iter_mut().find(|habit| habit.id == id) else {
        debug!("update_habit: no habit with id {id}, ignoring");
        return Ok(());
    };

    if let Some(name) = update.name {
        habit.name = name.trim().to_string();
    }
    if let Some(kind) = update.kind {
        habit.kind = kind;
    }
    if let Some(color) = update.color {
        habit.color = color;
    }
    if let Some(archived) = update.archived {
        habit.archived = archived;
    }
    if let Some(weather_dependent) = update.weather_dependent {
        habit.weather_dependent = weather_dependent;
    }
    if let Some(required_weather_types) = update.required_weather_types {
        habit.required_weather_types = required_weather_types;
    }
    if let Some(backup_habit_name) = update.backup_habit_name {
        habit.backup_habit_name = backup_habit_name;
    }

    store.write_habits(&habits).await
}

/// Removes the habit with `id` from the collection.
///
/// Deleting an unknown id is a silent no-op. Daily log entries referencing
/// the habit are left in place, so history for deleted habits stays
/// queryable.
///
/// # Errors
/// Fails only when the shrunken collection cannot be persisted.
#[instrument(skip(store))]
pub async fn delete_habit(store: &Store, id: &str) -> Result<()> {
    let _guard = store.lock_habits().await;
    let mut habits = store.read_habits().await;

    let before = habits.len();
    habits.retain(|habit| habit.id != id);
    if habits.len() == before {
        debug!("delete_habit: no habit with id {id}, ignoring");
        return Ok(());
    }

    info!("Deleted habit {id}");
    store.write_habits(&habits).await
}

/// Inserts the configured seed habits that are not already present.
///
/// Matching is by name, so re-running the seeder after a config change only
/// adds the new entries. Returns the number of habits inserted.
///
/// # Errors
/// Fails when the grown collection cannot be persisted.
#[instrument(skip(store, seeds))]
pub async fn seed_initial_habits(store: &Store, seeds: &[HabitSeed]) -> Result<usize> {
    let _guard = store.lock_habits().await;
    let mut habits = store.read_habits().await;
    let mut inserted = 0;

    for seed in seeds {
        if habits.iter().any(|habit| habit.name == seed.name) {
            debug!("Habit '{}' already exists, skipping seed", seed.name);
            continue;
        }

        info!("Seeding habit '{}'", seed.name);
        habits.push(Habit {
            id: Uuid::new_v4().to_string(),
            name: seed.name.clone(),
            kind: seed.kind.into(),
            color: seed.color.clone(),
            created_at: Utc::now().to_rfc3339(),
            archived: false,
            weather_dependent: seed.weather_dependent,
            required_weather_types: seed.required_weather_types.clone(),
            backup_habit_name: seed.backup_habit_name.clone(),
        });
        inserted += 1;
    }

    if inserted > 0 {
        store.write_habits(&habits).await?;
    }
    Ok(inserted)
}
