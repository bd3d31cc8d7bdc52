//! Abacus configuration.
//!
//! A configuration is a small JSON document:
//!
//! ```json
//! { "base": 10, "rows": 8 }
//! ```
//!
//! Missing fields take their defaults. Unlike [`BeadModel::configure`],
//! which clamps, loading a file rejects out-of-range values.
//!
//! [`BeadModel::configure`]: crate::BeadModel::configure

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::bead::{Base, MAX_ROWS, DEFAULT_ROWS};

/// Initial base and row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbacusConfig {
    pub base: u8,
    pub rows: usize,
}

impl AbacusConfig {
    /// Check that both fields are within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Base::MIN..=Base::MAX).contains(&self.base) {
            return Err(ConfigError::BaseOutOfRange(self.base));
        }
        if !(1..=MAX_ROWS).contains(&self.rows) {
            return Err(ConfigError::RowsOutOfRange(self.rows));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields with any values given, then validate.
    pub fn with_overrides(mut self, base: Option<u8>, rows: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(base) = base {
            self.base = base;
        }
        if let Some(rows) = rows {
            self.rows = rows;
        }
        self.validate()?;
        Ok(self)
    }
}

impl Default for AbacusConfig {
    fn default() -> Self {
        Self {
            base: Base::DECIMAL.get(),
            rows: DEFAULT_ROWS,
        }
    }
}

/// Load a configuration file from disk.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AbacusConfig, ConfigError> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::IoError(e.to_string()))?;
    AbacusConfig::from_json(&text)
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("base {0} out of range [{min}, {max}]", min = Base::MIN, max = Base::MAX)]
    BaseOutOfRange(u8),

    #[error("row count {0} out of range [1, {max}]", max = MAX_ROWS)]
    RowsOutOfRange(usize),
}
