use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use commands::Storage;
use extrack::{
    FileStore, LogStorage,
    types::{Config, OutputFmt, config_path},
};
use tracing::debug;

mod cli;
mod commands;

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Opens the log store chosen by flag, env, config or the default location.
fn open_storage(flag: Option<PathBuf>) -> Result<Storage> {
    let cfg = Config::load(&config_path()?)?;
    let data_file = cfg
        .data_file(flag)
        .context("Could not resolve the log store location")?;
    debug!(path = %data_file.display(), "opening log store");
    Ok(LogStorage::new(FileStore::new(data_file)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let fmt = OutputFmt::from_flag(cli.json);

    let data_file = cli.data_file;
    match cli.cmd {
        Commands::Config(cmd) => commands::config::handle(cmd)?,
        Commands::Log(cmd) => commands::log::handle(cmd, &mut open_storage(data_file)?, fmt).await?,
        Commands::Summary { mode, date } => {
            commands::summary::show_summary(&open_storage(data_file)?, mode, date, fmt)?
        }
        Commands::Totals { span, date } => {
            commands::summary::show_totals(&open_storage(data_file)?, span, date, fmt)?
        }
        Commands::Trend => commands::summary::show_trend(&open_storage(data_file)?, fmt)?,
        Commands::Insights => commands::summary::show_insights(&open_storage(data_file)?, fmt)?,
        Commands::Export { file, date } => {
            commands::data::export(&open_storage(data_file)?, file, date).await?
        }
        Commands::Import { file } => {
            commands::data::import(&mut open_storage(data_file)?, file, fmt).await?
        }
        Commands::Demo => commands::data::demo(&mut open_storage(data_file)?, fmt)?,
        Commands::Check => commands::data::check(&open_storage(data_file)?, fmt)?,
    }

    Ok(())
}
