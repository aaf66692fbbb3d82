//! Calendar arithmetic on timezone-naive dates.
//!
//! Log dates are stored as `YYYY-MM-DD` text. Everything here works on
//! `NaiveDate` so week and month boundaries never depend on the local
//! timezone of the machine running the tool.

use chrono::{Datelike, Days, Local, NaiveDate, TimeDelta};

/// Stored date text format.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Parses stored date text leniently.
///
/// Missing or non-numeric fields fall back to year 1970, month 1 and day 1.
/// Out-of-range months and days roll over into neighbouring months, so
/// `2026-02-30` is March 2nd and `2026-01-00` is December 31st of 2025.
/// Returns `None` only when the result is not representable.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let mut field = |fallback: i64| {
        parts
            .next()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(fallback)
    };
    let year = field(1970);
    let month = field(1);
    let day = field(1);

    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let y = i32::try_from(months.div_euclid(12)).ok()?;
    let m = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    if !(-9999..=9999).contains(&y) {
        return None;
    }

    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day.checked_sub(1)?)?)
}

/// Parses a user supplied date in strict `YYYY-MM-DD` form.
pub fn parse_strict(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FMT)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// Human form used in terminal output, e.g. `Mon, Feb 9, 2026`.
pub fn readable_date(text: &str) -> String {
    match parse_date(text) {
        Some(date) => date.format("%a, %b %-d, %Y").to_string(),
        None => text.to_string(),
    }
}

/// Today on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the week containing `date`. A Sunday belongs to the week that
/// started six days earlier.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Sunday closing the week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    let start = start_of_week(date);
    start.checked_add_days(Days::new(6)).unwrap_or(start)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// ISO 8601 label (`YYYY-Www`) of the Monday-start week containing `date`.
/// Week 1 is the week holding the year's first Thursday.
pub fn week_label(date: NaiveDate) -> String {
    let iso = start_of_week(date).iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    // Only built from week and month bounds, which are ordered by construction.
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "range start {start} is after end {end}");
        Self { start, end }
    }

    /// Monday through Sunday of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        Self::new(start_of_week(date), end_of_week(date))
    }

    /// First through last calendar day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self::new(start_of_month(date), end_of_month(date))
    }

    /// The same span shifted back by seven days.
    pub fn previous_week(&self) -> Self {
        let shift = |d: NaiveDate| d.checked_sub_days(Days::new(7)).unwrap_or(d);
        Self::new(shift(self.start), shift(self.end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `true` when the stored date text parses to a day inside the range.
    pub fn contains_text(&self, date: &str) -> bool {
        parse_date(date).is_some_and(|d| self.contains(d))
    }

    /// Every day of the range in order, formatted as stored date text.
    pub fn days(&self) -> Vec<String> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .map(format_date)
            .collect()
    }
}
