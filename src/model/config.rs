use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Text length cap when the config doesn't set one
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// Configuration from config.toml. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where records are stored. Default: `<data_dir>/tick/todos.json`
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Maximum characters per record, for the inputs and the store
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: None,
            max_length: default_max_length(),
            log: LogConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Default: `<data_dir>/tick/tick.log`
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme overrides, keyed by theme slot name, values `#RRGGBB`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
