//! Configuration file
//!
//! ```json
//! {
//!   "rules_file": "rules.json",
//!   "reference_date_key": "military_notice_date",
//!   "notice_event": "Military Notice Received",
//!   "notice_source": "military_notice",
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `rules_file` is required. A relative `rules_file` is resolved
//! against the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::evaluator::{
    TimelineConfig, DEFAULT_NOTICE_EVENT, DEFAULT_NOTICE_SOURCE, DEFAULT_REFERENCE_DATE_KEY,
};
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rule store path (required)
    pub rules_file: String,

    /// Fact key holding the timeline reference date
    #[serde(default = "default_reference_date_key")]
    pub reference_date_key: String,

    /// Event label of the timeline reference entry
    #[serde(default = "default_notice_event")]
    pub notice_event: String,

    /// Source of the timeline reference entry
    #[serde(default = "default_notice_source")]
    pub notice_source: String,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory of the config file
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_reference_date_key() -> String {
    DEFAULT_REFERENCE_DATE_KEY.to_string()
}
fn default_notice_event() -> String {
    DEFAULT_NOTICE_EVENT.to_string()
}
fn default_notice_source() -> String {
    DEFAULT_NOTICE_SOURCE.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.rules_file.trim().is_empty() {
            return Err(CliError::config_error("rules_file must not be empty"));
        }

        if self.reference_date_key.is_empty() {
            return Err(CliError::config_error("reference_date_key must not be empty"));
        }

        self.log_severity()?;

        Ok(())
    }

    /// Rule store path, resolved against the config directory
    pub fn rules_path(&self) -> PathBuf {
        let path = Path::new(&self.rules_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Timeline settings for the evaluator
    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig {
            reference_date_key: self.reference_date_key.clone(),
            notice_event: self.notice_event.clone(),
            notice_source: self.notice_source.clone(),
        }
    }
}
