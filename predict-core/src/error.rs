//! Error types for the contract layer

use thiserror::Error;

/// Contract-wide error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PredictError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PredictError::InvalidInput(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        PredictError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        PredictError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        PredictError::Internal(msg.into())
    }

    /// Fail with `InvalidInput` when a required string field is blank
    pub fn require(field: &str, value: &str) -> PredictResult<()> {
        if value.trim().is_empty() {
            Err(PredictError::InvalidInput(format!("{} is required", field)))
        } else {
            Ok(())
        }
    }
}

/// Result type alias for contract operations
pub type PredictResult<T> = Result<T, PredictError>;
