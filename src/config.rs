//! Engine configuration.
use crate::chart::sector::{is_canonical, LIFE_SECTOR};
use crate::error::ConfigError;
use crate::leverage::GuidanceTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Focus sector used when the request names none, or an unknown one.
    pub default_focus: String,
    /// Maximum pattern labels listed per layer in the human report.
    pub pattern_display_limit: usize,
    /// Maximum entries of the incoming-receiver ranking kept per layer.
    pub incoming_top_limit: usize,
    /// Replacement guidance table (JSON object); built-in table when unset.
    pub guidance_table: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_focus: LIFE_SECTOR.to_string(),
            pattern_display_limit: 12,
            incoming_top_limit: 8,
            guidance_table: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_canonical(&self.default_focus) {
            return Err(ConfigError::Invalid(format!(
                "default_focus '{}' is not a canonical sector name",
                self.default_focus
            )));
        }
        Ok(())
    }

    /// Loads the configured guidance table, or the built-in one.
    pub fn load_guidance(&self) -> Result<GuidanceTable, ConfigError> {
        match &self.guidance_table {
            Some(path) => GuidanceTable::from_json_file(path),
            None => Ok(GuidanceTable::default()),
        }
    }
}
