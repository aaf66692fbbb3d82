use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use extrack::date::parse_strict;

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_strict(s).map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}

#[derive(Parser)]
#[command(name = "extrack", version, about = "Daily exercise log with summaries and trends")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// Path of the log store file (overrides config and EXTRACK_DATA_FILE)
    #[arg(global = true, long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Daily log management
    #[command(subcommand, visible_alias = "l")]
    Log(LogCmd),

    /// Daily, weekly or monthly summary
    #[command(visible_alias = "s")]
    Summary {
        #[arg(value_enum, default_value = "daily")]
        mode: SummaryMode,

        /// Reference date (defaults to today)
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Minutes for every day of a week or month
    #[command(visible_alias = "t")]
    Totals {
        #[arg(value_enum)]
        span: Span,

        /// Reference date (defaults to today)
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Minutes per logged day over time
    Trend,

    /// Longest streak, most active day and weekly growth
    #[command(visible_alias = "i")]
    Insights,

    /// Write all logs to a JSON file
    Export {
        /// Output file (defaults to exercise-tracker-<date>.json)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Date used in the default file name (defaults to today)
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Replace all logs with the contents of a JSON file
    Import {
        /// Path to JSON file
        file: PathBuf,
    },

    /// Replace all logs with the bundled example data
    Demo,

    /// Check that the stored data is readable
    Check,

    /// View or edit extrack config
    #[command(subcommand)]
    Config(ConfigCmd),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SummaryMode {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Span {
    Week,
    Month,
}

//
// Commands
//

#[derive(Debug, Subcommand)]
pub enum LogCmd {
    /// Add an exercise to a day
    #[command(visible_alias = "a")]
    Add {
        /// Exercise name
        name: String,

        /// Duration in minutes
        #[arg(allow_negative_numbers = true)]
        minutes: f64,

        /// Day of the exercise (defaults to today)
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,

        #[arg(long, allow_negative_numbers = true)]
        sets: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        reps: Option<f64>,

        /// Distance in km
        #[arg(long, allow_negative_numbers = true)]
        distance: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        calories: Option<f64>,
    },

    /// Replace a whole day with the exercise array in a JSON file
    Set {
        /// JSON file holding an array of exercises
        file: PathBuf,

        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Show the exercises of a day
    #[command(visible_alias = "s")]
    Show {
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Remove one exercise from a day
    #[command(visible_alias = "rm")]
    Remove {
        /// 1-based exercise index (same order shown in `log show`)
        #[arg(value_name = "EX_IDX")]
        exercise: usize,

        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Remove a whole day
    Clear {
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// List every logged day
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
