//! Configuration management for lectern.
//!
//! Loads configuration from ${LECTERN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote library service.
    pub api_base_url: String,

    /// Timeout for HTTP requests in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    ///
    /// `LECTERN_API_URL` overrides the base URL regardless of the file.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var("LECTERN_API_URL") {
            config.api_base_url = url;
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes a default config file if none exists. Returns true if created.
    pub fn init() -> Result<bool> {
        let path = paths::config_path();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

pub mod paths {
    //! Path resolution for lectern configuration and session data.
    //!
    //! LECTERN_HOME resolution order:
    //! 1. LECTERN_HOME environment variable (if set)
    //! 2. ~/.config/lectern (default)

    use std::path::PathBuf;

    /// Returns the lectern home directory.
    pub fn lectern_home() -> PathBuf {
        if let Ok(home) = std::env::var("LECTERN_HOME") {
            return PathBuf::from(home);
        }

        home_dir()
            .map(|h| h.join(".config").join("lectern"))
            .expect("Could not determine home directory")
    }

    /// Returns the user's home directory.
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        lectern_home().join("config.toml")
    }

    /// Returns the path to the persisted session token.
    pub fn session_path() -> PathBuf {
        lectern_home().join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"http://books.example\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://books.example");
        // Missing fields keep their defaults.
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [not toml").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
