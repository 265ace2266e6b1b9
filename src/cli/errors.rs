//! CLI-specific error types
//!
//! Every CLI error ends the command with a non-zero exit code.

use std::fmt;
use std::io;

use crate::errors::DashboardError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout or export file)
    IoError,
    /// Requested entity is not in the filtered set
    EntityNotFound,
    /// Pipeline failure, carrying the pipeline's own code
    Pipeline(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CRIT_CLI_CONFIG_ERROR",
            Self::IoError => "CRIT_CLI_IO_ERROR",
            Self::EntityNotFound => "CRIT_CLI_ENTITY_NOT_FOUND",
            Self::Pipeline(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn entity_not_found(name: &str) -> Self {
        Self::new(
            CliErrorCode::EntityNotFound,
            format!("Entity '{}' is not in the filtered set", name),
        )
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<DashboardError> for CliError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::Config(msg) => Self::config_error(msg),
            other => {
                let mut message = other.to_string();
                // Surface the failing statements for diagnosis
                if let DashboardError::MissingData { causes, .. } = &other {
                    for cause in causes {
                        message.push_str(&format!("; {}", cause));
                        if let Some(query) = cause.query() {
                            message.push_str(&format!(" [query: {}]", query.trim()));
                        }
                    }
                }
                Self::new(CliErrorCode::Pipeline(other.code()), message)
            }
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
