use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

const APP_DIR: &str = "tick";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `<config_dir>/tick/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Base directory for the data file and the log file
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Read the config file. A missing file yields defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load from an explicit path, or from the default location when none is given
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) => read_config(&path),
            None => Ok(AppConfig::default()),
        },
    }
}

/// Data file path: the CLI override, then config, then the platform default
pub fn resolve_data_file(config: &AppConfig, cli_override: Option<&Path>) -> PathBuf {
    cli_override
        .map(Path::to_path_buf)
        .or_else(|| config.data_file.clone())
        .unwrap_or_else(|| default_data_dir().join("todos.json"))
}

pub fn resolve_log_file(config: &AppConfig) -> PathBuf {
    config
        .log
        .file
        .clone()
        .unwrap_or_else(|| default_data_dir().join("tick.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.max_length, 100);
        assert_eq!(config.log.level, "info");
        assert!(config.data_file.is_none());
    }

    #[test]
    fn reads_all_sections() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"data_file = "/tmp/elsewhere/todos.json"
max_length = 40

[log]
level = "debug"

[ui.colors]
highlight = "#112233"
"##,
        )
        .unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.max_length, 40);
        assert_eq!(config.log.level, "debug");
        assert_eq!(
            config.data_file,
            Some(PathBuf::from("/tmp/elsewhere/todos.json"))
        );
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "max_length = \"lots\"").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn cli_override_beats_config() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("from-config.json")),
            ..Default::default()
        };
        assert_eq!(
            resolve_data_file(&config, Some(Path::new("from-cli.json"))),
            PathBuf::from("from-cli.json")
        );
        assert_eq!(
            resolve_data_file(&config, None),
            PathBuf::from("from-config.json")
        );
    }
}
