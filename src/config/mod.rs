//! Configuration management for Toolserve
//!
//! Configuration is loaded from `~/.toolserve/config.json` with environment
//! variable overrides. There is no global config state: the loaded value is
//! passed explicitly into the components that need it.

mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use crate::error::{Result, ToolserveError};

impl Config {
    /// Returns the Toolserve configuration directory path (~/.toolserve)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".toolserve")
    }

    /// Returns the path to the config file (~/.toolserve/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that cannot work before any component is
    /// built from them.
    fn validate(&self) -> Result<()> {
        for (label, url) in [
            ("network.reader_base_url", &self.network.reader_base_url),
            ("docs.archive_url", &self.docs.archive_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ToolserveError::Config(format!(
                    "{label} must be an http:// or https:// URL, got '{url}'"
                )));
            }
        }
        if self.network.fetch_timeout_secs == 0 {
            return Err(ToolserveError::Config(
                "network.fetch_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.docs.download_timeout_secs == 0 {
            return Err(ToolserveError::Config(
                "docs.download_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.docs.max_results == 0 {
            return Err(ToolserveError::Config(
                "docs.max_results must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default path, creating the directory if
    /// needed.
    pub fn save(&self) -> Result<()> {
        let dir = Self::dir();
        std::fs::create_dir_all(&dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path(), content)?;
        Ok(())
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Variables follow the pattern `TOOLSERVE_SECTION_KEY`; the allowlist
    /// is a comma-separated list.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TOOLSERVE_NETWORK_ALLOWLIST") {
            self.network.allowlist = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(val) = std::env::var("TOOLSERVE_NETWORK_READER_BASE_URL") {
            self.network.reader_base_url = val;
        }
        if let Ok(val) = std::env::var("TOOLSERVE_NETWORK_FETCH_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                self.network.fetch_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("TOOLSERVE_DOCS_ARCHIVE_URL") {
            self.docs.archive_url = val;
        }
        if let Ok(val) = std::env::var("TOOLSERVE_DOCS_DOWNLOAD_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                self.docs.download_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("TOOLSERVE_DOCS_MAX_RESULTS") {
            if let Ok(v) = val.parse() {
                self.docs.max_results = v;
            }
        }
        if let Ok(val) = std::env::var("TOOLSERVE_DOCS_SNIPPET_CHARS") {
            if let Ok(v) = val.parse() {
                self.docs.snippet_chars = v;
            }
        }
    }
}
