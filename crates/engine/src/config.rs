// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration loaded from TOML

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Largest progress increment a config may ask for, in percentage points
pub const MAX_STEP: u8 = 30;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub uploads: UploadConfig,
    pub queue: QueueConfig,
}

/// How upload drivers pace and size their progress updates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Delay between progress updates
    #[serde(with = "humantime_serde")]
    pub tick: Duration,
    /// Smallest progress increment, in percentage points
    pub min_step: u8,
    /// Largest progress increment, in percentage points
    pub max_step: u8,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            min_step: 1,
            max_step: 30,
            seed: None,
        }
    }
}

/// Assignment queue presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Documents per page
    pub page_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

impl FolioConfig {
    /// Parse and validate configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let uploads = &self.uploads;
        if uploads.min_step == 0 {
            return Err(ConfigError::Invalid("uploads.min_step must be at least 1".into()));
        }
        if uploads.min_step > uploads.max_step {
            return Err(ConfigError::Invalid(format!(
                "uploads.min_step ({}) exceeds uploads.max_step ({})",
                uploads.min_step, uploads.max_step
            )));
        }
        if uploads.max_step > MAX_STEP {
            return Err(ConfigError::Invalid(format!(
                "uploads.max_step ({}) exceeds {}",
                uploads.max_step, MAX_STEP
            )));
        }
        if uploads.tick.is_zero() {
            return Err(ConfigError::Invalid("uploads.tick must be positive".into()));
        }
        if self.queue.page_size == 0 {
            return Err(ConfigError::Invalid("queue.page_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
