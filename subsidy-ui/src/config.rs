//! Optional TOML configuration for the subsidy form.
//!
//! Every section may be omitted. Missing values fall back to the nationally
//! fixed pricing table and `info` logging to stdout.
//!
//! ```toml
//! [pricing]
//! fallback_rate = "0.80"
//!
//! [[pricing.tiers]]
//! code = "1"
//! rate = "0.80"
//! label = "一级能效（80%）"
//!
//! [log]
//! level = "debug"
//! file = "subsidy.log"
//! stdout = true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use subsidy_core::{PricingCalculator, PricingTable, PricingTableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pricing table: {0}")]
    Pricing(#[from] PricingTableError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive such as `info` or `subsidy_core=debug`.
    /// `RUST_LOG` is used when unset.
    pub level: Option<String>,
    /// File that receives a copy of every record.
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingTable,
    pub log: LogConfig,
}

impl AppConfig {
    /// Reads and checks the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.pricing.validate()?;
        Ok(config)
    }

    pub fn pricing_calculator(&self) -> Result<PricingCalculator, ConfigError> {
        Ok(PricingCalculator::new(self.pricing.clone())?)
    }
}
