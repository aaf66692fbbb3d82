use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use extrack::{
    DailyLog, ExerciseEntry, StorageError,
    date::readable_date,
    types::{OutputFmt, emit},
    utils::format_number,
    validation::validate_daily_log,
};

use super::{Storage, day_or_today};
use crate::cli::LogCmd;

/// Exercise row as written by hand in a day file. `id` is generated when absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftEntry {
    id: Option<String>,
    #[serde(default)]
    name: String,
    duration_minutes: Option<f64>,
    sets: Option<f64>,
    reps: Option<f64>,
    distance_km: Option<f64>,
    calories: Option<f64>,
}

impl DraftEntry {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.duration_minutes.is_none()
    }

    fn into_entry(self) -> ExerciseEntry {
        let mut entry = ExerciseEntry::new(self.name.trim(), self.duration_minutes.unwrap_or(f64::NAN));
        if let Some(id) = self.id {
            entry.id = id;
        }
        entry.sets = self.sets;
        entry.reps = self.reps;
        entry.distance_km = self.distance_km;
        entry.calories = self.calories;
        entry
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayJson {
    date: String,
    exercises: usize,
    total_minutes: f64,
}

pub async fn handle(cmd: LogCmd, storage: &mut Storage, fmt: OutputFmt) -> Result<()> {
    match cmd {
        LogCmd::Add {
            name,
            minutes,
            date,
            sets,
            reps,
            distance,
            calories,
        } => {
            let date = day_or_today(date);
            let mut entry = ExerciseEntry::new(name.trim(), minutes);
            entry.sets = sets;
            entry.reps = reps;
            entry.distance_km = distance;
            entry.calories = calories;

            let mut log = storage
                .get_log_by_date(&date)
                .unwrap_or_else(|| DailyLog::new(date.clone(), Vec::new()));
            log.exercises.push(entry);
            let idx = log.exercises.len();

            save_day(storage, log)?;
            println!(
                "{} added {}. {} ({} min) to {}",
                "info:".blue().bold(),
                idx,
                name.trim().green(),
                format_number(minutes),
                date
            );
        }

        LogCmd::Set { file, date } => {
            let date = day_or_today(date);
            let exercises = read_day_file(&file).await?;
            let log = DailyLog::new(date.clone(), exercises);

            // Report only the first problem, like a form would.
            if let Some(first) = validate_daily_log(&log).into_iter().next() {
                bail!("{first}");
            }
            let count = log.exercises.len();
            save_day(storage, log)?;
            println!(
                "{} saved {} exercises for {}",
                "ok:".green().bold(),
                count,
                date
            );
        }

        LogCmd::Show { date } => {
            let date = day_or_today(date);
            let log = storage.get_log_by_date(&date);

            emit(fmt, &log, || {
                println!("{}", readable_date(&date).cyan().bold());
                let Some(log) = &log else {
                    println!("{}", "  (nothing logged)".dimmed());
                    return;
                };
                for (idx, entry) in log.exercises.iter().enumerate() {
                    println!("  {}. {}", (idx + 1).to_string().yellow(), describe(entry));
                }
                println!(
                    "\n{} {} min",
                    "Total minutes:".cyan().bold(),
                    format_number(log.total_minutes())
                );
            })?;
        }

        LogCmd::Remove { exercise, date } => {
            let date = day_or_today(date);
            let mut log = storage
                .get_log_by_date(&date)
                .ok_or_else(|| anyhow!("Nothing logged on {date}"))?;

            let idx = exercise
                .checked_sub(1)
                .filter(|i| *i < log.exercises.len())
                .ok_or_else(|| {
                    anyhow!(
                        "Exercise index must be between 1 and {}",
                        log.exercises.len()
                    )
                })?;
            let removed = log.exercises.remove(idx);

            if log.exercises.is_empty() {
                storage.remove_log(&date)?;
            } else {
                save_day(storage, log)?;
            }
            println!(
                "{} removed `{}` from {}",
                "info:".blue().bold(),
                removed.name,
                date
            );
        }

        LogCmd::Clear { date } => {
            let date = day_or_today(date);
            if storage.remove_log(&date)? {
                println!("{} Day cleared.", "info:".blue().bold());
            } else {
                println!("{} nothing logged on {}", "warning:".yellow().bold(), date);
            }
        }

        LogCmd::List => {
            let days: Vec<DayJson> = storage
                .get_logs()
                .into_iter()
                .map(|log| DayJson {
                    total_minutes: log.total_minutes(),
                    exercises: log.exercises.len(),
                    date: log.date,
                })
                .collect();

            emit(fmt, &days, || {
                if days.is_empty() {
                    println!("{}", "(no days logged)".dimmed());
                    return;
                }
                println!("{}", "Logged days:".cyan().bold());
                for day in &days {
                    println!(
                        "  {} • {} min ({} exercises)",
                        day.date.yellow(),
                        format_number(day.total_minutes),
                        day.exercises
                    );
                }
            })?;
        }
    }

    Ok(())
}

fn save_day(storage: &mut Storage, log: DailyLog) -> Result<()> {
    match storage.upsert_log(log) {
        Ok(()) => Ok(()),
        Err(StorageError::Validation(errors)) => {
            let first = errors.into_iter().next().unwrap_or_else(|| "Validation failed.".into());
            bail!("{first}")
        }
        Err(err) => Err(err).context("Failed to save daily log"),
    }
}

async fn read_day_file(path: &Path) -> Result<Vec<ExerciseEntry>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read file: `{}`", path.display()))?;
    let drafts: Vec<DraftEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Expected a JSON array of exercises in `{}`", path.display()))?;

    Ok(drafts
        .into_iter()
        .filter(|d| !d.is_blank())
        .map(DraftEntry::into_entry)
        .collect())
}

fn describe(entry: &ExerciseEntry) -> String {
    let mut parts = vec![format!(
        "{} — {} min",
        entry.name.bold(),
        format_number(entry.duration_minutes)
    )];
    if let Some(sets) = entry.sets {
        parts.push(format!("{} sets", format_number(sets)));
    }
    if let Some(reps) = entry.reps {
        parts.push(format!("{} reps", format_number(reps)));
    }
    if let Some(km) = entry.distance_km {
        parts.push(format!("{km} km"));
    }
    if let Some(kcal) = entry.calories {
        parts.push(format!("{} kcal", format_number(kcal)));
    }
    parts.join(" · ")
}
