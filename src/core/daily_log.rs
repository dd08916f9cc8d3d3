//! Daily log business logic - the entry upsert protocol and range queries.
//!
//! A daily log groups every habit entry recorded for one calendar date. Logs
//! are created lazily on the first write for their date, and entries within a
//! log are keyed by habit: writing twice for the same date and habit replaces
//! the entry instead of appending a second one.

use crate::{
    entities::{DailyLog, HabitEntry},
    errors::Result,
    store::Store,
};
use chrono::NaiveDate;
use tracing::{debug, instrument};

/// Retrieves every daily log, entry booleans already normalized.
///
/// Fails soft: a missing or corrupt log collection yields an empty list.
pub async fn load_daily_logs(store: &Store) -> Vec<DailyLog> {
    store.read_daily_logs().await
}

/// Retrieves the log for exactly `date`, or `None` when nothing has been
/// recorded on that date yet.
pub async fn get_daily_log(store: &Store, date: NaiveDate) -> Option<DailyLog> {
    load_daily_logs(store)
        .await
        .into_iter()
        .find(|log| log.date == date)
}

/// Records the state of one habit on one date.
///
/// The entry for `(date, habit_id)` is replaced wholesale: fields not passed
/// here do not survive from any previous entry for that slot. The log for
/// `date` is created on first use. Returns the entry exactly as stored.
///
/// # Errors
/// Fails when the updated log collection cannot be persisted; the write is
/// all-or-nothing, so a failure leaves the stored state untouched.
#[instrument(skip(store, note))]
pub async fn update_habit_entry(
    store: &Store,
    date: NaiveDate,
    habit_id: &str,
    completed: bool,
    quantity: Option<f64>,
    note: Option<String>,
) -> Result<HabitEntry> {
    let entry = HabitEntry {
        habit_id: habit_id.to_string(),
        date,
        completed,
        quantity,
        note,
    };

    let _guard = store.lock_daily_logs().await;
    let mut logs = store.read_daily_logs().await;

    if let Some(log) = logs.iter_mut().find(|log| log.date == date) {
        if let Some(existing) = log
            .entries
            .iter_mut()
            .find(|existing| existing.habit_id == habit_id)
        {
            *existing = entry.clone();
        } else {
            log.entries.push(entry.clone());
        }
    } else {
        logs.push(DailyLog {
            date,
            entries: vec![entry.clone()],
        });
    }

    store.write_daily_logs(&logs).await?;
    debug!("Recorded entry for habit {habit_id} on {date}");
    Ok(entry)
}

/// Collects the entries for `habit_id` whose date lies in the inclusive
/// `[start, end]` range, sorted ascending by date.
pub async fn get_habit_entries_in_range(
    store: &Store,
    habit_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<HabitEntry> {
    let mut entries: Vec<HabitEntry> = load_daily_logs(store)
        .await
        .into_iter()
        .filter(|log| log.date >= start && log.date <= end)
        .flat_map(|log| log.entries)
        .filter(|entry| entry.habit_id == habit_id)
        .collect();
    entries.sort_by_key(|entry| entry.date);
    entries
}

/// Collects every entry ever recorded for `habit_id`, in no particular
/// order. The statistics engine runs on this.
pub async fn get_entries_for_habit(store: &Store, habit_id: &str) -> Vec<HabitEntry> {
    load_daily_logs(store)
        .await
        .into_iter()
        .flat_map(|log| log.entries)
        .filter(|entry| entry.habit_id == habit_id)
        .collect()
}
