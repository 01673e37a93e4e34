//! Bootstrap configuration loading and config file discovery
//!
//! Resolution priority:
//! 1. Explicit path (command-line argument or `COVERSTAT_CONFIG`)
//! 2. User config file (`<config_dir>/coverstat/config.toml`)
//! 3. Compiled defaults
//!
//! A missing user config file is not an error. A missing explicit file is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default catalog API host
pub const DEFAULT_API_BASE_URL: &str = "https://archive.org";

/// Default catalog collection searched for covers
pub const DEFAULT_COLLECTION: &str = "mediahistory";

/// Default catalog format filter
pub const DEFAULT_FORMAT: &str = "Pressbooks";

/// Scrape endpoint minimum page size
pub const MIN_PAGE_SIZE: u32 = 100;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Catalog connection settings (optional)
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

/// Catalog connection settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogSettings {
    /// Base URL for the search and metadata endpoints
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Collection the query is restricted to
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Format the query is restricted to
    #[serde(default = "default_format")]
    pub format: String,

    /// Identifiers requested per search page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            collection: default_collection(),
            format: default_format(),
            page_size: default_page_size(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_page_size() -> u32 {
    MIN_PAGE_SIZE
}

impl TomlConfig {
    /// Parse TOML text and validate the result
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.catalog.page_size < MIN_PAGE_SIZE {
            return Err(Error::Config(format!(
                "catalog.page_size must be at least {} (got {})",
                MIN_PAGE_SIZE, self.catalog.page_size
            )));
        }
        if self.catalog.api_base_url.trim().is_empty() {
            return Err(Error::Config("catalog.api_base_url is empty".to_string()));
        }
        Ok(())
    }
}

/// Default per-user config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("coverstat").join("config.toml"))
}

/// Load bootstrap configuration
///
/// `explicit` is the path named on the command line (or via environment).
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        info!("Loading config from {}", path.display());
        return TomlConfig::from_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            TomlConfig::from_file(&path)
        }
        _ => {
            debug!("No config file found, using compiled defaults");
            Ok(TomlConfig::default())
        }
    }
}
