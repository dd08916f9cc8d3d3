//! Daily log entities - Represents per-day habit entries.
//!
//! A `DailyLog` groups every entry recorded for one calendar date; each
//! `HabitEntry` records the state of one habit on that date. Completion flags
//! pass through loose-boolean normalization on read (older stores wrote
//! strings and nulls) and are strict booleans from then on.

use crate::entities::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// State of one habit on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEntry {
    /// ID of the habit this entry records; may outlive the habit itself
    pub habit_id: String,
    /// Calendar date the entry belongs to
    #[serde(with = "normalize::date_key")]
    pub date: NaiveDate,
    /// Whether the habit counted as done on this date
    #[serde(default, deserialize_with = "normalize::deserialize_loose_bool")]
    pub completed: bool,
    /// Recorded amount, meaningful only for quantity habits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Free-form note attached by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// All entries recorded for one calendar date.
///
/// Logs are created lazily on the first entry write for their date and are
/// never deleted. Within a log there is at most one entry per habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// Calendar date this log covers, unique across the collection
    #[serde(with = "normalize::date_key")]
    pub date: NaiveDate,
    /// Entries recorded for this date, at most one per habit
    #[serde(default)]
    pub entries: Vec<HabitEntry>,
}
