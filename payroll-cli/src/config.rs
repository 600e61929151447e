//! TOML configuration for the command-line front-end.
//!
//! Every section is optional; anything left out falls back to the modeled
//! regime and the default 6 × 8 sweep lattice.
//!
//! ```toml
//! [regime.personal]
//! standard_deduction = 75000
//! rebate_threshold = 1200000
//! cess_multiplier = 1.04
//!
//! [[regime.personal.schedule]]
//! upper_bound = 400000
//! rate = 0
//!
//! [[regime.personal.schedule]]
//! rate = 0.10
//!
//! [regime.corporate]
//! effective_rate = 0.25168
//!
//! [sweep]
//! headcounts = [1, 2, 3, 4]
//! salary_steps = [0, 1275000, 2000000]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use payroll_core::{RegimeConfig, RegimeConfigError, SweepGrid, SweepGridError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Regime(#[from] RegimeConfigError),

    #[error(transparent)]
    Sweep(#[from] SweepGridError),
}

/// Everything the front-end reads from its configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub regime: RegimeConfig,
    pub sweep: SweepGrid,
}

impl AppConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::parse(&text, &path.display().to_string())
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parses and validates TOML text. `origin` names the source in errors.
    pub fn parse(
        text: &str,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.regime.validate()?;
        self.sweep.validate()?;
        Ok(())
    }
}
