use crate::error::{FormzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

pub const KEYS: &[&str] = &["date-format", "show-responses"];

/// Configuration for formz, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormzConfig {
    /// chrono format string used for creation dates in the form list
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Show how many responses each form has collected in the list
    #[serde(default = "default_show_responses")]
    pub show_responses: bool,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_show_responses() -> bool {
    true
}

impl Default for FormzConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            show_responses: default_show_responses(),
        }
    }
}

impl FormzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FormzError::Io)?;
        let config: FormzConfig =
            serde_json::from_str(&content).map_err(FormzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FormzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FormzError::Serialization)?;
        fs::write(config_path, content).map_err(FormzError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "date-format" => Some(self.date_format.clone()),
            "show-responses" => Some(self.show_responses.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "date-format" => {
                if value.trim().is_empty() {
                    return Err("date-format cannot be empty".to_string());
                }
                self.date_format = value.to_string();
                Ok(())
            }
            "show-responses" => {
                self.show_responses = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    other => return Err(format!("Invalid boolean for show-responses: {}", other)),
                };
                Ok(())
            }
            other => Err(format!("Unknown config key: {}", other)),
        }
    }
}
