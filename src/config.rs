//! Runtime configuration: optional JSON file, then environment overrides.
//!
//! ```json
//! {
//!   "store_url": "https://example-default-rtdb.firebaseio.com/",
//!   "admin_key": "1234",
//!   "timeout_secs": 10,
//!   "zero_convention": "mirror",
//!   "simulation": { "duration": 10.0, "samples": 1000, "sample_period": 0.1 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rootlocus_types::{SimulationSettings, ZeroConvention};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::HttpStore;
use crate::utils::constants::DEFAULT_TIMEOUT_SECS;

pub const ENV_STORE_URL: &str = "ROOTLOCUS_STORE_URL";
pub const ENV_ADMIN_KEY: &str = "ROOTLOCUS_ADMIN_KEY";
pub const ENV_TIMEOUT_SECS: &str = "ROOTLOCUS_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("no store URL configured (set store_url or ROOTLOCUS_STORE_URL)")]
    MissingStoreUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the record store
    pub store_url: Option<String>,
    /// Identifier that unlocks grading
    pub admin_key: Option<String>,
    pub timeout_secs: u64,
    pub zero_convention: ZeroConvention,
    pub simulation: SimulationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: None,
            admin_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            zero_convention: ZeroConvention::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl AppConfig {
    /// File (if given) overridden by the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment-style overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL) {
            self.store_url = Some(url);
        }
        if let Some(key) = lookup(ENV_ADMIN_KEY) {
            self.admin_key = Some(key);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_TIMEOUT_SECS,
                    value,
                })?;
        }
        Ok(())
    }

    /// True when `identifier` equals a non-empty admin key
    pub fn is_admin(&self, identifier: &str) -> bool {
        matches!(&self.admin_key, Some(key) if !key.is_empty() && key == identifier)
    }

    pub fn store_url(&self) -> Result<&str, ConfigError> {
        self.store_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingStoreUrl)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP store at the configured URL
    pub fn http_store(&self) -> crate::Result<HttpStore> {
        Ok(HttpStore::new(self.store_url()?, self.timeout())?)
    }
}
