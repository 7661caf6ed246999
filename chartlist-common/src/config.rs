//! Configuration loading and resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The binaries parse (1) and (2) together through clap's `env` support and
//! hand the result to [`ServerConfig::resolve`] / [`CrawlerConfig::resolve`]
//! as overrides.

use crate::dataset::DEFAULT_DATASET_PATH;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CHARTLIST_CONFIG";

/// Compiled defaults used when no other source provides a value
pub mod defaults {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 8000;
    pub const LOG_LEVEL: &str = "info";
    pub const CHART_URL: &str = "https://www.melon.com/chart/index.htm";
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const TIMEOUT_SECS: u64 = 30;
}

/// On-disk TOML configuration
///
/// Every field is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub log_level: Option<String>,
    pub server: ServerSection,
    pub dataset: DatasetSection,
    pub crawler: CrawlerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlerSection {
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Locate the config file: explicit path, then `CHARTLIST_CONFIG`, then the
/// platform config directory (`~/.config/chartlist/config.toml` on Linux)
pub fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("chartlist").join("config.toml"))
}

/// Parse a TOML config file, failing on missing or malformed content
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Outcome of looking for the config file
///
/// The log level can come from the file, so loading happens before tracing is
/// initialized; binaries call [`ConfigSource::log`] once it is.
#[derive(Debug)]
pub enum ConfigSource {
    /// No candidate path (no explicit path, env var or platform config dir)
    Unset,
    /// Candidate path does not exist; defaults apply
    Missing(PathBuf),
    Loaded(PathBuf),
    /// File exists but could not be read or parsed; defaults apply
    Ignored(PathBuf, Error),
}

impl ConfigSource {
    /// Report the outcome through tracing
    pub fn log(&self) {
        match self {
            ConfigSource::Unset => info!("No config file location (using defaults)"),
            ConfigSource::Missing(path) => {
                info!("No config file at {} (using defaults)", path.display())
            }
            ConfigSource::Loaded(path) => info!("Loaded config file {}", path.display()),
            ConfigSource::Ignored(path, e) => {
                warn!("Ignoring config file {}: {}", path.display(), e)
            }
        }
    }
}

/// Load the TOML config with graceful degradation
///
/// A missing file yields defaults; a malformed file yields defaults and an
/// [`ConfigSource::Ignored`] outcome. Neither stops startup.
pub fn load_toml_config(explicit: Option<&Path>) -> (TomlConfig, ConfigSource) {
    let Some(path) = config_file_path(explicit) else {
        return (TomlConfig::default(), ConfigSource::Unset);
    };

    if !path.exists() {
        return (TomlConfig::default(), ConfigSource::Missing(path));
    }

    match read_toml_config(&path) {
        Ok(config) => (config, ConfigSource::Loaded(path)),
        Err(e) => (TomlConfig::default(), ConfigSource::Ignored(path, e)),
    }
}

/// Command-line/environment values for the API service
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dataset_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Resolved API service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub log_level: String,
}

impl ServerConfig {
    pub fn resolve(overrides: ServerOverrides, toml: &TomlConfig) -> Self {
        Self {
            host: overrides
                .host
                .or_else(|| toml.server.host.clone())
                .unwrap_or_else(|| defaults::HOST.to_string()),
            port: overrides
                .port
                .or(toml.server.port)
                .unwrap_or(defaults::PORT),
            dataset_path: overrides
                .dataset_path
                .or_else(|| toml.dataset.path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            log_level: resolve_log_level(overrides.log_level, toml),
        }
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Command-line/environment values for the crawler
#[derive(Debug, Clone, Default)]
pub struct CrawlerOverrides {
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Resolved crawler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    pub url: String,
    pub user_agent: String,
    /// Defaults to the dataset path the API service reads
    pub output: PathBuf,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl CrawlerConfig {
    pub fn resolve(overrides: CrawlerOverrides, toml: &TomlConfig) -> Self {
        Self {
            url: overrides
                .url
                .or_else(|| toml.crawler.url.clone())
                .unwrap_or_else(|| defaults::CHART_URL.to_string()),
            user_agent: overrides
                .user_agent
                .or_else(|| toml.crawler.user_agent.clone())
                .unwrap_or_else(|| defaults::USER_AGENT.to_string()),
            output: overrides
                .output
                .or_else(|| toml.crawler.output.clone())
                .or_else(|| toml.dataset.path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            timeout_secs: overrides
                .timeout_secs
                .or(toml.crawler.timeout_secs)
                .unwrap_or(defaults::TIMEOUT_SECS),
            log_level: resolve_log_level(overrides.log_level, toml),
        }
    }
}

fn resolve_log_level(cli: Option<String>, toml: &TomlConfig) -> String {
    cli.or_else(|| toml.log_level.clone())
        .unwrap_or_else(|| defaults::LOG_LEVEL.to_string())
}
