use chrono::NaiveDate;
use extrack::{FileStore, LogStorage, date};

pub mod config;
pub mod data;
pub mod log;
pub mod summary;

pub type Storage = LogStorage<FileStore>;

/// Selected date as stored text, defaulting to today.
fn day_or_today(day: Option<NaiveDate>) -> String {
    date::format_date(day.unwrap_or_else(date::today))
}
