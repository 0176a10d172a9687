//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fast Finance API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every service is composed against, trailing slash included
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3001/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path. The dashboard owns the terminal while it runs, so
    /// request failures go here rather than to stderr.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> Option<String> {
    dirs::data_local_dir().map(|p| {
        p.join("fastfin")
            .join("fastfin.log")
            .to_string_lossy()
            .to_string()
    })
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment. Returns the path that
    /// was actually used so the caller can log it once a subscriber is
    /// installed (logging is initialized after the config is known).
    pub fn load_default() -> (Self, Option<PathBuf>) {
        let candidates: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("fastfin").join("config.toml")),
            Some(PathBuf::from("./fastfin.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_from_candidates(&candidates)
    }

    /// Load the first readable config among `candidates`, falling back to
    /// an environment-only config when none applies.
    pub fn load_from_candidates(candidates: &[PathBuf]) -> (Self, Option<PathBuf>) {
        for path in candidates {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => return (config, Some(path.clone())),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        (Self::from_env(), None)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("FASTFIN_API_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(level) = std::env::var("FASTFIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(file) = std::env::var("FASTFIN_LOG_FILE") {
            self.logging.file = Some(file);
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Fast Finance client configuration
#
# Environment variables override these settings:
# - FASTFIN_API_URL
# - FASTFIN_LOG_LEVEL
# - FASTFIN_LOG_FILE

[api]
# Base URL of the Fast Finance API, trailing slash included
base_url = "http://localhost:3001/"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (the dashboard owns the terminal, so logs go to a file)
# file = "~/.local/share/fastfin/fastfin.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3001/");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[api]\nbase_url = \"https://api.example.com/\"").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/");
        // Unspecified sections fall back to defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://file.example.com/\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        std::env::set_var("FASTFIN_API_URL", "https://env.example.com/");
        std::env::set_var("FASTFIN_LOG_LEVEL", "debug");

        let config = Config::load_with_env(&path).unwrap();

        std::env::remove_var("FASTFIN_API_URL");
        std::env::remove_var("FASTFIN_LOG_LEVEL");

        assert_eq!(config.api.base_url, "https://env.example.com/");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_candidates_pick_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[logging]\nfile = \"/tmp/fastfin-test.log\"\n").unwrap();

        let (config, source) =
            Config::load_from_candidates(&[missing, present.clone()]);

        assert_eq!(source.as_deref(), Some(present.as_path()));
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/fastfin-test.log"));
    }

    #[test]
    fn test_no_candidates_reports_no_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let (_config, source) = Config::load_from_candidates(&[missing]);
        assert!(source.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let content = generate_default_config();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3001/");
    }
}
