//! Configuration loading and backing-store resolution
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub const DEFAULT_DATA_DIR: &str = "./data/artists";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_DATA_DIR: &str = "SPACE84_DATA_DIR";
pub const ENV_BACKEND: &str = "SPACE84_BACKEND";
pub const ENV_HOST: &str = "SPACE84_HOST";
pub const ENV_PORT: &str = "SPACE84_PORT";

/// Which file format the backing directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// `<slug>.json` documents
    #[default]
    Json,
    /// `<slug>.md` documents with a frontmatter block
    Markdown,
}

impl BackendKind {
    /// File extension (without dot) of records in this backend
    pub fn extension(self) -> &'static str {
        match self {
            BackendKind::Json => "json",
            BackendKind::Markdown => "md",
        }
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(BackendKind::Json),
            "markdown" | "md" => Ok(BackendKind::Markdown),
            other => Err(Error::Config(format!(
                "Unknown backend '{}' (expected 'json' or 'markdown')",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Json => f.write_str("json"),
            BackendKind::Markdown => f.write_str("markdown"),
        }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Contents of `fanfic.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub backend: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub backend: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve configuration from CLI, environment, TOML file and defaults
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let toml_config = load_toml_config(cli.config_file.as_deref())?;

        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| std::env::var(ENV_DATA_DIR).ok().map(PathBuf::from))
            .or_else(|| toml_config.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let backend = match cli
            .backend
            .clone()
            .or_else(|| std::env::var(ENV_BACKEND).ok())
            .or_else(|| toml_config.backend.clone())
        {
            Some(value) => value.parse()?,
            None => BackendKind::default(),
        };

        let host = cli
            .host
            .clone()
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or_else(|| toml_config.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(value) => value.trim().parse().map_err(|_| {
                    Error::Config(format!("{} must be a port number, got '{}'", ENV_PORT, value))
                })?,
                Err(_) => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        Ok(Self {
            data_dir,
            backend,
            host,
            port,
            log_level: toml_config.logging.level,
        })
    }
}

/// Load the TOML config file
///
/// A missing file falls back to defaults with a warning; a file that exists
/// but does not parse is a configuration error.
pub fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                warn!("Could not determine config directory, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    if !path.exists() {
        if explicit_path.is_some() {
            warn!("Config file not found: {}, using defaults", path.display());
        } else {
            info!("No config file at {}, using defaults", path.display());
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Platform config file location, e.g. `~/.config/space84/fanfic.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("space84").join("fanfic.toml"))
}
