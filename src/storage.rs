use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    error::{DataError, StorageError, StorageResult},
    models::{DailyLog, ImportOutcome},
    validation::validate_daily_log,
};

/// Key the whole log collection is persisted under.
pub const LOGS_KEY: &str = "exercise-tracker.logs.v1";

/// Persistent string key/value store holding the serialized collection.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DataError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), DataError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DataError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), DataError> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object file (`{"key": "value", ...}`).
/// A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, DataError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DataError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), DataError> {
        let mut all = match self.read_all() {
            Ok(all) => all,
            Err(DataError::Io(err)) => return Err(DataError::Io(err)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "overwriting unreadable store file");
                BTreeMap::new()
            }
        };
        all.insert(key.to_string(), value);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        // Write beside the target then rename so readers never see half a file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&all)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), key, "store written");
        Ok(())
    }
}

/// Daily log persistence over any `KeyValueStore`.
///
/// Every operation reads the full collection, works on it in memory and
/// writes the full collection back.
#[derive(Debug, Clone)]
pub struct LogStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LogStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored logs sorted by date. Unreadable data reads as an empty collection;
    /// use `try_get_logs` to see the failure.
    pub fn get_logs(&self) -> Vec<DailyLog> {
        match self.try_get_logs() {
            Ok(logs) => logs,
            Err(err) => {
                warn!(error = %err, "persisted logs are unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Like `get_logs` but reports a corrupted or non-array stored value.
    /// Array elements that do not decode as a daily log are dropped.
    pub fn try_get_logs(&self) -> Result<Vec<DailyLog>, DataError> {
        let Some(raw) = self.store.get(LOGS_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let Value::Array(items) = serde_json::from_str::<Value>(&raw)? else {
            return Err(DataError::NotAnArray);
        };

        let mut logs: Vec<DailyLog> = items
            .into_iter()
            .enumerate()
            .filter_map(|(idx, item)| match serde_json::from_value::<DailyLog>(item) {
                Ok(log) => Some(log),
                Err(err) => {
                    warn!(index = idx, error = %err, "dropping malformed stored log");
                    None
                }
            })
            .collect();
        sort_by_date(&mut logs);
        Ok(logs)
    }

    pub fn get_log_by_date(&self, date: &str) -> Option<DailyLog> {
        self.get_logs().into_iter().find(|log| log.date == date)
    }

    /// Validates `log`, then inserts it or replaces the log with the same date.
    pub fn upsert_log(&mut self, log: DailyLog) -> StorageResult<()> {
        let errors = validate_daily_log(&log);
        if !errors.is_empty() {
            return Err(StorageError::Validation(errors));
        }

        let mut logs = self.get_logs();
        match logs.iter().position(|item| item.date == log.date) {
            Some(idx) => logs[idx] = log,
            None => logs.push(log),
        }
        sort_by_date(&mut logs);
        self.save_logs(&logs)
    }

    /// Overwrites the stored collection as given, without validation.
    pub fn save_logs(&mut self, logs: &[DailyLog]) -> StorageResult<()> {
        let raw = serde_json::to_string(logs)?;
        self.store.set(LOGS_KEY, raw)?;
        info!(count = logs.len(), "saved daily logs");
        Ok(())
    }

    /// Drops the log for `date`. Returns whether one existed.
    pub fn remove_log(&mut self, date: &str) -> StorageResult<bool> {
        let logs = self.get_logs();
        let before = logs.len();
        let kept: Vec<DailyLog> = logs.into_iter().filter(|log| log.date != date).collect();
        let removed = kept.len() != before;
        self.save_logs(&kept)?;
        Ok(removed)
    }

    /// Pretty-printed JSON array of the whole sorted collection.
    pub fn export_data(&self) -> StorageResult<String> {
        Ok(serde_json::to_string_pretty(&self.get_logs())?)
    }

    /// Replaces the whole collection with the logs in `raw`.
    ///
    /// All or nothing: the first element that fails validation aborts the
    /// import and nothing is written. Only a failing store write is an `Err`.
    pub fn import_data(&mut self, raw: &str) -> StorageResult<ImportOutcome> {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "import is not valid JSON");
                return Ok(ImportOutcome::failed("Invalid JSON file."));
            }
        };
        let Value::Array(items) = value else {
            return Ok(ImportOutcome::failed(
                "Invalid JSON structure. Expected an array.",
            ));
        };

        let mut cleaned: Vec<DailyLog> = Vec::with_capacity(items.len());
        for item in items {
            let log = match serde_json::from_value::<DailyLog>(item) {
                Ok(log) => log,
                Err(err) => {
                    warn!(error = %err, "import element has the wrong shape");
                    return Ok(ImportOutcome::failed("Invalid JSON file."));
                }
            };

            let errors = validate_daily_log(&log);
            if !errors.is_empty() {
                return Ok(ImportOutcome::failed(format!(
                    "Import failed for {}: {}",
                    log.date,
                    errors.join(" ")
                )));
            }

            // A repeated date replaces the earlier element.
            match cleaned.iter().position(|c| c.date == log.date) {
                Some(idx) => cleaned[idx] = log,
                None => cleaned.push(log),
            }
        }

        sort_by_date(&mut cleaned);
        self.save_logs(&cleaned)?;
        info!(count = cleaned.len(), "imported daily logs");
        Ok(ImportOutcome::ok(format!(
            "Imported {} daily logs.",
            cleaned.len()
        )))
    }
}

fn sort_by_date(logs: &mut [DailyLog]) {
    logs.sort_by(|a, b| a.date.cmp(&b.date));
}
