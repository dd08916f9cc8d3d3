//! Entity module - Contains the data model structs persisted by the store.
//! These entities map one-to-one onto the JSON records in the collection
//! files, including the normalization shims for values written by older app
//! versions.

/// Daily log and habit entry models
pub mod daily_log;
/// Habit model and the habit kind enum
pub mod habit;
/// Loose-boolean and date-key normalization helpers
pub mod normalize;

pub use daily_log::{DailyLog, HabitEntry};
pub use habit::{AutomaticRule, Habit, HabitKind};
