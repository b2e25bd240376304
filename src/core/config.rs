use crate::core::error::ExchangeError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};
use tracing::debug;

fn default_data_format() -> String {
    "json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Deserialize, Serialize, Clone)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub apikey: String,
    #[serde(default)]
    pub base_currency: String,
    /// Empty means every currency the service supports.
    #[serde(default)]
    pub target_currencies: Vec<String>,
    #[serde(default = "default_data_format")]
    pub data_format: String,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ExchangeConfig {
    pub fn new(apikey: &str, base_currency: &str, target_currencies: &[&str]) -> Self {
        ExchangeConfig {
            apikey: apikey.to_string(),
            base_currency: base_currency.to_string(),
            target_currencies: target_currencies.iter().map(|c| c.to_string()).collect(),
            data_format: default_data_format(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Rejects configurations the API cannot be called with.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.apikey.is_empty() {
            return Err(ExchangeError::Configuration(
                "'apikey' cannot be blank".to_string(),
            ));
        }

        if self.base_currency.is_empty() {
            return Err(ExchangeError::Configuration(
                "'base_currency' cannot be blank".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ExchangeError::Configuration(
                "'timeout_secs' must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Keeps the API key out of debug logs.
impl fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("apikey", &"<redacted>")
            .field("base_currency", &self.base_currency)
            .field("target_currencies", &self.target_currencies)
            .field("data_format", &self.data_format)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxgather", "fxgather")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
