use crate::error::{Result, TodoError};
use crate::tasks::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "todolist.json";
const DEFAULT_DATA_FILE: &str = "tasks-data.txt";

pub const KEYS: [&str; 3] = ["data-file", "initial-capacity", "autosave"];

/// Configuration for todolist, stored as todolist.json in the scope directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoConfig {
    /// Data file name, relative to the scope directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Capacity written to the header of a brand new data file
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Save on exit when there are unsaved changes
    #[serde(default)]
    pub autosave: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_initial_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            initial_capacity: default_initial_capacity(),
            autosave: false,
        }
    }
}

impl TodoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodoError::Io)?;
        let config: TodoConfig =
            serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "initial-capacity" => Some(self.initial_capacity.to_string()),
            "autosave" => Some(self.autosave.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(TodoError::Config("data-file cannot be empty".to_string()));
                }
                self.data_file = value.to_string();
            }
            "initial-capacity" => {
                self.initial_capacity = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        TodoError::Config(format!(
                            "initial-capacity must be a positive number, got '{}'",
                            value
                        ))
                    })?;
            }
            "autosave" => {
                self.autosave = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        return Err(TodoError::Config(format!(
                            "autosave must be true or false, got '{}'",
                            value
                        )))
                    }
                };
            }
            other => return Err(TodoError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
