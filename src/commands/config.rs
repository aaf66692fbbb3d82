use anyhow::Result;
use colored::Colorize;

use extrack::types::{Config, DATA_FILE_KEY, config_path};

use crate::cli::ConfigCmd;

const KNOWN_KEYS: &[&str] = &[DATA_FILE_KEY];

pub fn handle(cmd: ConfigCmd) -> Result<()> {
    let config_path = config_path()?;
    let mut cfg = Config::load(&config_path)?;

    match cmd {
        ConfigCmd::List => {
            if cfg.map.is_empty() {
                println!("{}", "(no config set)".dimmed());
            } else {
                println!("{}", "Config:".cyan().bold());
                for (k, v) in &cfg.map {
                    println!("  {} = {}", k.green(), v);
                }
            }
            // Where logs will actually be read from, after env and defaults.
            if let Ok(path) = cfg.data_file(None) {
                println!("{} {}", "Log store:".cyan().bold(), path.display());
            }
        }

        ConfigCmd::Get { key } => match cfg.map.get(&key) {
            Some(val) => println!("{val}"),
            None => warn_missing(&key),
        },

        ConfigCmd::Set { key, val } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                println!(
                    "{} `{}` is not a key extrack reads (known: {})",
                    "warning:".yellow().bold(),
                    key,
                    KNOWN_KEYS.join(", ")
                );
            }
            cfg.map.insert(key.clone(), val.clone());
            cfg.save(&config_path)?;
            println!("{} set `{}` = `{}`", "info:".blue().bold(), key.green(), val);
        }

        ConfigCmd::Unset { key } => {
            if cfg.map.remove(&key).is_some() {
                cfg.save(&config_path)?;
                println!("{} removed `{}`", "info:".blue().bold(), key.green());
            } else {
                warn_missing(&key);
            }
        }
    }

    Ok(())
}

fn warn_missing(key: &str) {
    println!("{} key `{}` not found", "warning:".yellow().bold(), key);
}
