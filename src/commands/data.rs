use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use extrack::{
    ImportOutcome,
    types::{OutputFmt, emit},
};

use super::{Storage, day_or_today};

const EXAMPLE_DATA: &str = include_str!("../../demos/example-data.json");

/// Default export file name for the selected day.
pub fn export_file_name(day: &str) -> String {
    format!("exercise-tracker-{day}.json")
}

pub async fn export(storage: &Storage, file: Option<PathBuf>, date: Option<NaiveDate>) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(export_file_name(&day_or_today(date))));
    let json = storage.export_data().context("Failed to serialize logs")?;

    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    println!("{} exported logs to {}", "ok:".green().bold(), path.display());
    Ok(())
}

pub async fn import(storage: &mut Storage, file: PathBuf, fmt: OutputFmt) -> Result<()> {
    let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Could not read file: `{}`", file.display()))?;
    let outcome = storage.import_data(&raw).context("Failed to store imported logs")?;
    report(outcome, fmt)
}

pub fn demo(storage: &mut Storage, fmt: OutputFmt) -> Result<()> {
    let outcome = storage
        .import_data(EXAMPLE_DATA)
        .context("Failed to store example data")?;
    report(outcome, fmt)
}

fn report(outcome: ImportOutcome, fmt: OutputFmt) -> Result<()> {
    emit(fmt, &outcome, || {
        if outcome.success {
            println!("{} {}", "ok:".green().bold(), outcome.message);
        }
    })?;
    if !outcome.success {
        bail!("{}", outcome.message);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckJson {
    path: String,
    readable: bool,
    days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Reports whether the store decodes, instead of silently reading it as empty.
pub fn check(storage: &Storage, fmt: OutputFmt) -> Result<()> {
    let path = storage.store().path().display().to_string();
    let report = match storage.try_get_logs() {
        Ok(logs) => CheckJson {
            path,
            readable: true,
            days: logs.len(),
            error: None,
        },
        Err(err) => CheckJson {
            path,
            readable: false,
            days: 0,
            error: Some(err.to_string()),
        },
    };

    emit(fmt, &report, || match &report.error {
        None => println!(
            "{} {} days stored in {}",
            "ok:".green().bold(),
            report.days,
            report.path
        ),
        Some(err) => println!(
            "{} {} is unreadable ({}); it reads as empty until fixed or replaced",
            "warning:".yellow().bold(),
            report.path,
            err
        ),
    })?;

    if !report.readable {
        bail!("stored data is unreadable");
    }
    Ok(())
}
