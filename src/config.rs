//! Configuration loaded from `~/.config/vembed/config.toml`.
//!
//! Only the transport and the cache store are configurable. Provider
//! endpoints are fixed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub cache: CacheConfig,
}

/// Transport settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("vembed/{}", crate::VERSION),
        }
    }
}

/// Metadata cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Directory holding cached documents. Defaults to the platform cache dir.
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheConfig {
    /// Directory the file cache should live in.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("vembed")
        })
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load configuration from an explicit path, defaulting when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vembed")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert!(config.http.user_agent.starts_with("vembed/"));
        assert!(config.cache.enabled);
        assert!(config.cache.dir.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
[http]
timeout_secs = 5

[cache]
enabled = false
dir = "/tmp/vembed-cache"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.resolved_dir(), PathBuf::from("/tmp/vembed-cache"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http\ntimeout_secs = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.cache.enabled);
    }

    #[test]
    fn config_path_ends_with_app_dir() {
        let path = config_path();
        assert!(path.ends_with("vembed/config.toml"));
    }
}
