//! Normalizer configuration

use predict_core::MaxProfitPolicy;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable selecting the max profit policy
pub const MAX_PROFIT_POLICY_VAR: &str = "PREDICT_MAX_PROFIT_POLICY";

/// Configuration for the status and valuation normalizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// How per-position best-case profit is bounded in event aggregates
    #[serde(default)]
    pub max_profit_policy: MaxProfitPolicy,
}

impl NormalizerConfig {
    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - PREDICT_MAX_PROFIT_POLICY: `sum` or `floored` (optional, defaults to `sum`)
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(MAX_PROFIT_POLICY_VAR) {
            Ok(value) => Self::from_policy_str(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
                field: MAX_PROFIT_POLICY_VAR.to_string(),
                value: "<non-unicode>".to_string(),
            }),
        }
    }

    fn from_policy_str(value: &str) -> Result<Self, ConfigError> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        let max_profit_policy = value.parse().map_err(|_| ConfigError::InvalidValue {
            field: MAX_PROFIT_POLICY_VAR.to_string(),
            value: value.to_string(),
        })?;
        Ok(Self { max_profit_policy })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            NormalizerConfig::from_policy_str("floored").unwrap().max_profit_policy,
            MaxProfitPolicy::FlooredPerPosition
        );
        assert_eq!(
            NormalizerConfig::from_policy_str("SUM").unwrap().max_profit_policy,
            MaxProfitPolicy::PerPositionSum
        );
        assert_eq!(
            NormalizerConfig::from_policy_str("").unwrap(),
            NormalizerConfig::default()
        );
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = NormalizerConfig::from_policy_str("max").unwrap_err();
        assert!(err.to_string().contains(MAX_PROFIT_POLICY_VAR));
    }
}
