use std::{fs, io, path::Path, path::PathBuf};

use bevy_ecs::resource::Resource;
use serde::Deserialize;
use thiserror::Error;

use crate::model;

/// Tick cadence and decay tuning for the economy schedule.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Ticks between priority evaluations.
    pub evaluation_interval: u32,
    /// Ticks between production cycles.
    pub production_interval: u32,
    /// Amount a perishable without storage loses per decay pass.
    pub decay_unit: f64,
    /// Ticks between decay passes.
    pub decay_interval: u32,
    /// Resources the ledger starts with.
    pub resources: Vec<model::Resource>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            evaluation_interval: 3,
            production_interval: 3,
            decay_unit: 1.0,
            decay_interval: 3,
            resources: Vec::new(),
        }
    }
}

impl EconomyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("evaluation_interval", self.evaluation_interval),
            ("production_interval", self.production_interval),
            ("decay_interval", self.decay_interval),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if !self.decay_unit.is_finite() || self.decay_unit < 0.0 {
            return Err(ConfigError::Invalid {
                field: "decay_unit",
                reason: format!("must be a non-negative number, got {}", self.decay_unit),
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse economy config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read economy config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
