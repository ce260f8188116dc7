//! Configuration loading and management

use crate::core::error::HalError;
use crate::projection::DEFAULT_MAX_DEPTH;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_style() -> String {
    "hal".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Settings of the HAL projection layer
///
/// ```yaml
/// style: hal        # media style served, as in application/hal.v1+json
/// max_depth: 64     # deepest resource nesting a projection may reach
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalConfig {
    /// Media style that triggers projection (compared case-insensitively)
    #[serde(default = "default_style")]
    pub style: String,

    /// Maximum nesting depth of a projection
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            max_depth: default_max_depth(),
        }
    }
}

impl HalConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings
    pub fn validate(&self) -> Result<(), HalError> {
        if self.style.trim().is_empty() {
            return Err(HalError::Config("style must not be empty".to_string()));
        }
        if !self
            .style
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(HalError::Config(format!(
                "style '{}' may only contain ASCII letters, digits and '-'",
                self.style
            )));
        }
        if self.max_depth == 0 {
            return Err(HalError::Config("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}
