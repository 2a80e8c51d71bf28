//! JSON file configuration store.
//!
//! Implements [`ConfigPort`] over a single JSON document.  Keys are the
//! camelCase names of [`PetConfig`]; missing keys take their defaults.
//! The loaded config is validated before it is returned.

use std::io;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::PetConfig;
use crate::error::ConfigError;

/// Largest config file accepted.
const MAX_CONFIG_BYTES: u64 = 4 * 1024;

pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load, falling back to defaults when the file is absent or invalid.
    pub fn load_or_default(&self) -> PetConfig {
        match self.load() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                info!("Config: {} not found, using defaults", self.path.display());
                PetConfig::default()
            }
            Err(e) => {
                warn!("Config: {} rejected ({}), using defaults", self.path.display(), e);
                PetConfig::default()
            }
        }
    }
}

impl ConfigPort for JsonConfigStore {
    fn load(&self) -> Result<PetConfig, ConfigError> {
        let meta = std::fs::metadata(&self.path).map_err(map_io)?;
        if meta.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::Corrupted);
        }
        let bytes = std::fs::read(&self.path).map_err(map_io)?;
        let config = PetConfig::from_json(&bytes)?;
        info!("Config: loaded {}", self.path.display());
        Ok(config)
    }
}

fn map_io(e: io::Error) -> ConfigError {
    if e.kind() == io::ErrorKind::NotFound {
        ConfigError::NotFound
    } else {
        ConfigError::Io
    }
}
