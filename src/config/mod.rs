//! Configuration file
//!
//! JSON object with the database location and the default filter settings.
//! Only `database_path` is required:
//!
//! ```json
//! {
//!   "database_path": "./school.db",
//!   "selected_entities": [],
//!   "min_enrollments": 0,
//!   "min_criteria": 1,
//!   "display_limit": 30,
//!   "sort_by": "total_criteria",
//!   "log_level": "INFO"
//! }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DashboardError, DashboardResult};
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::selection::{FilterConfig, Metric, DEFAULT_DISPLAY_LIMIT};

/// Allowed range for the number of rows shown per view
pub const DISPLAY_LIMIT_RANGE: RangeInclusive<usize> = 5..=100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQLite database file (required)
    pub database_path: PathBuf,

    #[serde(default)]
    pub selected_entities: BTreeSet<String>,

    #[serde(default)]
    pub min_enrollments: u64,

    /// Must be at least 1
    #[serde(default = "default_min_criteria")]
    pub min_criteria: u64,

    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Column key of the default sort, see `Metric`
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_min_criteria() -> u64 {
    1
}
fn default_display_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}
fn default_sort_by() -> String {
    Metric::TotalCriteria.as_str().to_string()
}
fn default_log_level() -> String {
    Severity::Info.as_str().to_string()
}

impl Config {
    /// Config with defaults for everything but the database
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            selected_entities: BTreeSet::new(),
            min_enrollments: 0,
            min_criteria: default_min_criteria(),
            display_limit: default_display_limit(),
            sort_by: default_sort_by(),
            log_level: default_log_level(),
        }
    }

    /// Load and validate configuration from a file.
    ///
    /// A relative `database_path` is resolved against the file's directory.
    pub fn load(path: &Path) -> DashboardResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        if config.database_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.database_path = dir.join(&config.database_path);
            }
        }

        let db = config.database_path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("database_path", db.as_str())]);

        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> DashboardResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| DashboardError::Config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> DashboardResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(DashboardError::Config("database_path must not be empty".into()));
        }

        if self.min_criteria == 0 {
            return Err(DashboardError::Config("min_criteria must be >= 1".into()));
        }

        if !DISPLAY_LIMIT_RANGE.contains(&self.display_limit) {
            return Err(DashboardError::Config(format!(
                "display_limit must be between {} and {}, got {}",
                DISPLAY_LIMIT_RANGE.start(),
                DISPLAY_LIMIT_RANGE.end(),
                self.display_limit
            )));
        }

        self.sort_metric()?;
        self.severity()?;
        Ok(())
    }

    /// The configured default sort column
    pub fn sort_metric(&self) -> DashboardResult<Metric> {
        self.sort_by.parse()
    }

    /// The configured minimum log severity
    pub fn severity(&self) -> DashboardResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            DashboardError::Config(format!("invalid log_level: '{}'", self.log_level))
        })
    }

    /// Filter settings for a render pass
    pub fn filter(&self) -> FilterConfig {
        FilterConfig::default()
            .with_entities(self.selected_entities.iter().cloned())
            .with_min_enrollments(self.min_enrollments)
            .with_min_criteria(self.min_criteria)
            .with_display_limit(self.display_limit)
    }
}
