//! Daily exercise log with summaries and trend insights.
//!
//! Logs are kept as one JSON array in a key/value store. The summary engine
//! works on plain slices of logs and never touches the store itself.

pub mod date;
pub mod error;
pub mod models;
pub mod storage;
pub mod summary;
pub mod types;
pub mod utils;
pub mod validation;

pub use error::{DataError, StorageError};
pub use models::{DailyLog, ExerciseEntry, ImportOutcome, SummaryStats, TrendInsights, TrendPoint};
pub use storage::{FileStore, KeyValueStore, LogStorage, MemoryStore};
