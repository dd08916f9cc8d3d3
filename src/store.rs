//! JSON collection store backing the habit and daily-log repositories.
//!
//! Each logical collection persists as one JSON array file under the data
//! directory. Reads tolerate a missing or corrupt file by degrading to an
//! empty collection; writes go through a temp file and rename so readers
//! always see a complete snapshot. One async mutex per collection serializes
//! mutating read-modify-write cycles, which would otherwise lose updates at
//! full-collection granularity.

use crate::entities::{DailyLog, Habit};
use crate::errors::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Collection key for habit definitions.
pub const HABITS_KEY: &str = "habits";
/// Collection key for daily logs.
pub const DAILY_LOGS_KEY: &str = "daily_logs";

/// Handle to the on-disk store.
///
/// Cheap to share by reference; all methods take `&self`.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    habits_lock: Mutex<()>,
    logs_lock: Mutex<()>,
}

impl Store {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Fails when the data directory cannot be created.
    pub async fn open<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        debug!("Opening habit store at {:?}", root);

        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| Error::Store {
                message: format!("Failed to create data directory {}: {e}", root.display()),
            })?;

        Ok(Self {
            root,
            habits_lock: Mutex::new(()),
            logs_lock: Mutex::new(()),
        })
    }

    /// Reads the habit collection.
    ///
    /// A missing or unreadable collection yields an empty list rather than an
    /// error, so callers can always render something.
    pub async fn read_habits(&self) -> Vec<Habit> {
        self.read_collection(HABITS_KEY).await
    }

    /// Reads the daily log collection, with the same fail-soft contract as
    /// [`Store::read_habits`].
    pub async fn read_daily_logs(&self) -> Vec<DailyLog> {
        self.read_collection(DAILY_LOGS_KEY).await
    }

    /// Replaces the stored habit collection.
    ///
    /// # Errors
    /// Fails when the collection cannot be serialized or written.
    pub async fn write_habits(&self, habits: &[Habit]) -> Result<()> {
        self.write_collection(HABITS_KEY, habits).await
    }

    /// Replaces the stored daily log collection.
    ///
    /// # Errors
    /// Fails when the collection cannot be serialized or written.
    pub async fn write_daily_logs(&self, logs: &[DailyLog]) -> Result<()> {
        self.write_collection(DAILY_LOGS_KEY, logs).await
    }

    /// Serializes mutating access to the habit collection.
    ///
    /// Mutating operations hold this guard across their whole
    /// load-modify-persist cycle; plain reads do not need it because writes
    /// land atomically via rename.
    pub async fn lock_habits(&self) -> MutexGuard<'_, ()> {
        self.habits_lock.lock().await
    }

    /// Serializes mutating access to the daily log collection.
    pub async fn lock_daily_logs(&self) -> MutexGuard<'_, ()> {
        self.logs_lock.lock().await
    }

    fn collection_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.collection_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Collection '{key}' not present yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read collection '{key}': {e}; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(values) => values,
            Err(e) => {
                warn!("Collection '{key}' is corrupt ({e}); treating as empty");
                Vec::new()
            }
        }
    }

    async fn write_collection<T: Serialize>(&self, key: &str, values: &[T]) -> Result<()> {
        let path = self.collection_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(values)?;

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| Error::Store {
                message: format!("Failed to write collection '{key}': {e}"),
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::Store {
                message: format!("Failed to commit collection '{key}': {e}"),
            })?;

        debug!("Wrote {} records to collection '{key}'", values.len());
        Ok(())
    }
}

/// Returns the file path a collection key maps to under `root`.
///
/// Exposed for tooling that needs to inspect the raw files; normal access
/// goes through [`Store`].
#[must_use]
pub fn collection_file(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{key}.json"))
}
