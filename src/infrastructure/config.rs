//! Configuration infrastructure
//!
//! Contains configuration loading and management for industry rank queries.
//! The configuration is a single JSON file; every field has a default, so a
//! partial file only overrides what it mentions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use tokio::fs;
use tracing::info;
use url::Url;

use crate::domain::Ticker;
use crate::infrastructure::http_client::HttpClientConfig;
use crate::infrastructure::parsing::ParsingConfig;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream page locations
    pub endpoints: EndpointConfig,

    /// HTTP client behaviour
    pub http: HttpClientConfig,

    /// Extraction patterns
    pub parsing: ParsingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream page locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Quote page URL without the ticker parameter
    pub quote_base_url: String,

    /// Query parameter carrying the ticker
    pub quote_ticker_param: String,

    /// Industry groups listing, fixed grouping and sort
    pub groups_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            quote_base_url: finviz::QUOTE_BASE_URL.to_string(),
            quote_ticker_param: finviz::QUOTE_TICKER_PARAM.to_string(),
            groups_url: finviz::GROUPS_URL.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Quote page URL for `ticker`, with the ticker query-encoded
    pub fn quote_url(&self, ticker: &Ticker) -> Result<String> {
        let mut url = Url::parse(&self.quote_base_url)
            .with_context(|| format!("Invalid quote base URL: {}", self.quote_base_url))?;
        url.query_pairs_mut()
            .append_pair(&self.quote_ticker_param, ticker.as_str());
        Ok(url.into())
    }

    /// Check that both URLs parse
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.quote_base_url)
            .with_context(|| format!("Invalid quote base URL: {}", self.quote_base_url))?;
        Url::parse(&self.groups_url)
            .with_context(|| format!("Invalid groups URL: {}", self.groups_url))?;
        anyhow::ensure!(
            !self.quote_ticker_param.trim().is_empty(),
            "Quote ticker parameter must not be empty"
        );
        Ok(())
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to the app data directory
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "info".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("h2".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Get application data directory
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get user data directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(data_dir)
    }

    /// Configuration manager for the default location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Configuration manager for an explicit file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path).await
            .context("Failed to read configuration file")?;

        match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => {
                info!("Loaded configuration from: {:?}", self.config_path);
                Ok(config)
            }
            Err(parse_error) => {
                tracing::warn!("⚠️  Configuration file unreadable: {}", parse_error);
                tracing::warn!("⚠️  Resetting to default configuration");

                // Keep the corrupted file around for inspection
                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(e) = fs::copy(&self.config_path, &backup_path).await {
                    tracing::warn!("Failed to create backup of corrupted config: {}", e);
                } else {
                    tracing::info!("Backed up corrupted config to: {:?}", backup_path);
                }

                let default_config = AppConfig::default();
                self.save_config(&default_config).await
                    .context("Failed to save default configuration")?;

                Ok(default_config)
            }
        }
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await
                .context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(config)
            .context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content).await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Upstream site URLs
pub mod finviz {
    /// Quote page, takes the ticker as `?t=`
    pub const QUOTE_BASE_URL: &str = "https://finviz.com/quote.ashx";

    /// Query parameter name for the ticker on the quote page
    pub const QUOTE_TICKER_PARAM: &str = "t";

    /// Industry groups, performance view, sorted by name
    pub const GROUPS_URL: &str = "https://finviz.com/groups.ashx?g=industry&v=210&o=name";
}

/// Default values
pub mod defaults {
    /// Directory name under the user config/data directories
    pub const APP_DIR_NAME: &str = "industry-rank";

    /// Configuration file name
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 15;

    /// Default user agent
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default log file name
    pub const LOG_FILE_NAME: &str = "industry-rank.log";
}
