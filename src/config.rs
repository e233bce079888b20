//! YAML configuration file support for brewmatch.
//!
//! All pipeline settings can be kept in one YAML file and loaded at runtime.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "production"
//!
//! knn:
//!   version: 1
//!   k: 1
//!   use_parallel: false
//!
//! recommend:
//!   skip_empty_histories: true
//!   exclude_user_id: null
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;

use knn::KnnConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RecommendConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrewmatchConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Nearest-neighbor matcher configuration
    #[serde(default)]
    pub knn: KnnYamlConfig,

    /// Recommendation pipeline configuration
    #[serde(default)]
    pub recommend: RecommendYamlConfig,

    /// Log output configuration, read by the binary
    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl BrewmatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: BrewmatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.knn.validate()?;
        self.recommend.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Pipeline settings described by this file.
    pub fn recommend_config(&self) -> RecommendConfig {
        RecommendConfig {
            knn: KnnConfig {
                version: self.knn.version,
                k: self.knn.k,
                use_parallel: self.knn.use_parallel,
            },
            skip_empty_histories: self.recommend.skip_empty_histories,
            exclude_user_id: self.recommend.exclude_user_id.clone(),
        }
    }
}

impl Default for BrewmatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            knn: KnnYamlConfig::default(),
            recommend: RecommendYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnnYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default)]
    pub use_parallel: bool,
}

impl KnnYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "knn.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for KnnYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: 1,
            use_parallel: false,
        }
    }
}

/// Recommendation pipeline YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendYamlConfig {
    #[serde(default = "true_value")]
    pub skip_empty_histories: bool,

    #[serde(default)]
    pub exclude_user_id: Option<String>,
}

impl RecommendYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if let Some(user_id) = &self.exclude_user_id {
            if user_id.trim().is_empty() {
                return Err(ConfigLoadError::Validation(
                    "recommend.exclude_user_id must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for RecommendYamlConfig {
    fn default() -> Self {
        Self {
            skip_empty_histories: true,
            exclude_user_id: None,
        }
    }
}

/// Logging YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingYamlConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn default_k() -> usize {
    1
}
fn true_value() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
