use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

/// Config key holding the path of the JSON store file.
pub const DATA_FILE_KEY: &str = "data_file";

/// Environment override for the store file path.
pub const DATA_FILE_ENV: &str = "EXTRACK_DATA_FILE";

/// Flat string key/value configuration, stored as a TOML table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

impl Config {
    /// Loads the config at `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let map = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(Self { map })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        let content = toml::to_string(&self.map)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to save config to {}", path.display()))
    }

    /// Store file location: explicit flag, then environment, then the
    /// `data_file` key, then the platform data directory.
    pub fn data_file(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path);
        }
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = self.map.get(DATA_FILE_KEY) {
            return Ok(PathBuf::from(path));
        }
        dirs::data_dir()
            .map(|d| d.join("extrack").join("logs.json"))
            .context("Could not determine data directory")
    }
}

/// Default location of the config file.
pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("extrack").join("config"))
        .context("Could not determine config directory")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFmt {
    Text,
    Json,
}

impl OutputFmt {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Prints `value` as pretty JSON, or runs `text` for the coloured form.
pub fn emit<T: Serialize>(fmt: OutputFmt, value: &T, text: impl FnOnce()) -> Result<()> {
    match fmt {
        OutputFmt::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFmt::Text => text(),
    }
    Ok(())
}
