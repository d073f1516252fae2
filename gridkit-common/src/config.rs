//! Configuration loading
//!
//! Resolution order for the config file:
//! 1. Command-line `--config <path>` (must exist)
//! 2. `GRIDKIT_CONFIG` environment variable (must exist)
//! 3. Platform config file (`~/.config/gridkit/config.toml` on Linux)
//! 4. Compiled defaults
//!
//! A missing file at the platform location is not an error. After the file is
//! loaded, `GRIDKIT_API_BASE_URL`, `GRIDKIT_LOG_LEVEL` and `GRIDKIT_WEB_PORT`
//! override individual values.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::openf1::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::{Error, Result};

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
    pub mock: MockConfig,
}

/// Upstream data API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// HTTP facade settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for `/` and `/<path>`
    pub static_root: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_root: PathBuf::from("."),
        }
    }
}

/// Placeholder grid for a season with no published data
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Dates in this year get the fixed mock grid; `None` disables it
    pub season: Option<i32>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self { season: Some(2025) }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformFile(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::CommandLine(p) => write!(f, "{} (--config)", p.display()),
            ConfigSource::Environment(p) => write!(f, "{} (GRIDKIT_CONFIG)", p.display()),
            ConfigSource::PlatformFile(p) => write!(f, "{}", p.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl ConfigSource {
    /// File the configuration was read from, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformFile(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl TomlConfig {
    /// Resolve, read and parse the configuration, then apply env overrides
    pub fn load(cli_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let source = if let Some(path) = cli_path {
            ConfigSource::CommandLine(path.to_path_buf())
        } else if let Ok(path) = std::env::var("GRIDKIT_CONFIG") {
            ConfigSource::Environment(PathBuf::from(path))
        } else {
            match platform_config_path() {
                Some(path) if path.exists() => ConfigSource::PlatformFile(path),
                _ => ConfigSource::Defaults,
            }
        };

        let mut config = match source.path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;

        Ok((config, source))
    }

    /// Parse one TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("GRIDKIT_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Ok(level) = std::env::var("GRIDKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(port) = std::env::var("GRIDKIT_WEB_PORT") {
            self.web.port = port
                .parse()
                .map_err(|_| Error::Config(format!("GRIDKIT_WEB_PORT is not a port: {port}")))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::Config("api.base_url must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// `<config dir>/gridkit/config.toml`
pub fn platform_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gridkit").join(CONFIG_FILE_NAME))
}
