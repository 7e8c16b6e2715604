//! Error types for dpreval.

use thiserror::Error;

/// Result type alias for dpreval operations.
pub type Result<T> = std::result::Result<T, DprError>;

/// Error types for the extraction and simulation engines.
///
/// Text parsing never produces an error: unmatched lines are skipped and
/// unreadable numbers become `None`. Errors are reserved for simulation
/// preconditions and configuration.
#[derive(Error, Debug)]
pub enum DprError {
    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`EvaluationConfig`](crate::core::config::EvaluationConfig).
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl DprError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(feature = "python")]
impl From<DprError> for pyo3::PyErr {
    fn from(err: DprError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
