//! Genesis configuration

use crate::{CoreError, CoreResult, Timestamp, BLOCK_VERSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fixed genesis timestamp, 2016-04-18T04:00:00Z in milliseconds
pub const DEFAULT_GENESIS_TIMESTAMP: Timestamp = 1_460_952_000_000;

/// Parameters of the genesis block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Block format version of the genesis block
    pub version: u8,
    /// Genesis timestamp in milliseconds
    pub timestamp: Timestamp,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            version: BLOCK_VERSION,
            timestamp: DEFAULT_GENESIS_TIMESTAMP,
        }
    }
}

impl GenesisConfig {
    pub fn new(version: u8, timestamp: Timestamp) -> Self {
        Self { version, timestamp }
    }

    /// Load configuration from file. `.toml` files are read as TOML,
    /// anything else as JSON.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: GenesisConfig = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file, in TOML or JSON by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CoreResult<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        fs::write(path, content).map_err(|e| {
            CoreError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.version == 0 {
            return Err(CoreError::Config(
                "Genesis version must be greater than 0".to_string(),
            ));
        }

        if self.timestamp < 0 {
            return Err(CoreError::Config(format!(
                "Genesis timestamp must not be negative: {}",
                self.timestamp
            )));
        }

        Ok(())
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}
