//! YAML configuration for the docdrift pipeline.
//!
//! Every stage config can be set from a single YAML file and loaded at
//! runtime. Omitted sections and fields fall back to their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # docdrift pipeline configuration
//! version: "1.0"
//! name: "encyclopedia audit"
//!
//! canonical:
//!   version: 1
//!   min_sentence_chars: 10
//!   strip_markup: true
//!   strip_reference_markers: true
//!   normalize_unicode: false
//!
//! semantic:
//!   model_name: "feature-hash-v1"
//!   dimension: 384
//!   parallel: true
//!   max_concurrency: 10
//!   batch_pause: 100        # milliseconds
//!
//! matcher:
//!   version: "v1"
//!   parallel: true
//!   thresholds:
//!     match_min: 0.85
//!     paraphrase_min: 0.60
//!     hallucination_max: 0.30
//!
//! report:
//!   max_discrepancies: 10
//!   max_sentence_chars: 500
//!   flag_below: 0.6
//!   hallucination_below: 0.3
//! ```

use std::fs;
use std::path::Path;

use canonical::SplitConfig;
use matcher::MatchConfig;
use semantic::SemanticConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::ReportConfig;

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

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DocdriftConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Sentence extraction
    #[serde(default)]
    pub canonical: SplitConfig,

    /// Sentence embedding
    #[serde(default)]
    pub semantic: SemanticConfig,

    /// Alignment and classification
    #[serde(default)]
    pub matcher: MatchConfig,

    /// Discrepancy report selection
    #[serde(default)]
    pub report: ReportConfig,
}

impl DocdriftConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DocdriftConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("canonical: {e}")))?;
        self.semantic
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("semantic: {e}")))?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;
        self.report
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("report: {e}")))?;

        Ok(())
    }
}

impl Default for DocdriftConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            canonical: SplitConfig::default(),
            semantic: SemanticConfig::default(),
            matcher: MatchConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
