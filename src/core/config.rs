use crate::core::period::LookbackPeriod;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Display name to instrument symbol.
pub type InstrumentMap = BTreeMap<String, String>;

/// Region to instruments quoted for that region.
pub type RegionalInstruments = BTreeMap<String, InstrumentMap>;

/// Failure to load the configuration document. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
}

impl Default for YahooProviderConfig {
    fn default() -> Self {
        YahooProviderConfig {
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub yahoo: YahooProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// The instrument reference document plus server and provider settings.
///
/// Every key is optional; a missing mapping is treated as empty.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub interest_rates: RegionalInstruments,
    /// Keys are `"{region} CPI"`.
    #[serde(default)]
    pub inflation: InstrumentMap,
    #[serde(default)]
    pub fx_rates: InstrumentMap,
    #[serde(default)]
    pub commodities_indices: InstrumentMap,
    #[serde(default)]
    pub other: RegionalInstruments,
    #[serde(default)]
    pub default_periods: Vec<LookbackPeriod>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Ok(Self::load_from_path(&config_path)?)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "macrodash", "macrodash")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to `null`.
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(s)
    }

    /// Periods offered by the period selector, in configured order.
    pub fn selectable_periods(&self) -> Vec<LookbackPeriod> {
        let mut periods: Vec<LookbackPeriod> = Vec::new();
        for period in &self.default_periods {
            if period.is_selectable() && !periods.contains(period) {
                periods.push(*period);
            }
        }
        if periods.is_empty() {
            periods = LookbackPeriod::ALL
                .into_iter()
                .filter(LookbackPeriod::is_selectable)
                .collect();
        }
        periods
    }

    pub fn default_period(&self) -> LookbackPeriod {
        let periods = self.selectable_periods();
        if periods.contains(&LookbackPeriod::OneMonth) {
            LookbackPeriod::OneMonth
        } else {
            periods[0]
        }
    }
}
