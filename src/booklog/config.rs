use crate::error::{BooklogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DATA_FILE: &str = "books_data.json";
const DEFAULT_PROGRESS_DECIMALS: usize = 2;
const MAX_PROGRESS_DECIMALS: usize = 6;

/// Configuration for booklog, stored in `config.json` next to the book file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BooklogConfig {
    /// File name of the book collection inside the scope directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Decimals shown for the completion percentage
    #[serde(default = "default_progress_decimals")]
    pub progress_decimals: usize,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_progress_decimals() -> usize {
    DEFAULT_PROGRESS_DECIMALS
}

impl Default for BooklogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            progress_decimals: default_progress_decimals(),
        }
    }
}

impl BooklogConfig {
    pub const KEYS: &'static [&'static str] = &["data-file", "progress-decimals"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BooklogError::Io)?;
        let config: BooklogConfig =
            serde_json::from_str(&content).map_err(BooklogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BooklogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BooklogError::Serialization)?;
        fs::write(config_path, content).map_err(BooklogError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "progress-decimals" => Some(self.progress_decimals.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => {
                let value = value.trim();
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err(BooklogError::Config(format!(
                        "data-file must be a plain file name, got '{}'",
                        value
                    )));
                }
                self.data_file = value.to_string();
            }
            "progress-decimals" => {
                let decimals: usize = value.trim().parse().map_err(|_| {
                    BooklogError::Config(format!(
                        "progress-decimals must be a number, got '{}'",
                        value
                    ))
                })?;
                if decimals > MAX_PROGRESS_DECIMALS {
                    return Err(BooklogError::Config(format!(
                        "progress-decimals must be at most {}",
                        MAX_PROGRESS_DECIMALS
                    )));
                }
                self.progress_decimals = decimals;
            }
            _ => {
                return Err(BooklogError::Config(format!(
                    "Unknown config key: {} (expected one of: {})",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
