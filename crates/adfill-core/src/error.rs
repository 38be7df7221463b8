//! Error types for the Adfill runner
//!
//! Two layers:
//! - [`ConfigError`] — anything wrong with the configuration, caught at load
//!   time (a bad prompt mode or regex never reaches the item loop)
//! - [`RunnerError`] — failures during a run; collaborator failures abort
//!   the invocation without advancing the cursor for the in-flight item

use adfill_gateways::GatewayError;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Name-matching pattern did not compile
    #[error("invalid name pattern: {0}")]
    InvalidNamePattern(#[from] regex::Error),

    /// A value failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failures during a runner invocation
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A collaborator call failed; the invocation aborts
    #[error("gateway failure: {0}")]
    Gateway(#[from] GatewayError),

    /// Configuration was rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RunnerError {
    /// Check if a fresh invocation could plausibly succeed
    ///
    /// Configuration errors are permanent; gateway failures inherit the
    /// gateway's own classification.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(err) => err.is_retryable(),
            Self::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_not_retryable() {
        let err = RunnerError::Config(ConfigError::Invalid("target is zero".to_string()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn gateway_errors_inherit_classification() {
        let err = RunnerError::Gateway(GatewayError::ImageGen("timeout".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn display_includes_cause() {
        let err = RunnerError::Gateway(GatewayError::Ads("boom".to_string()));
        assert!(err.to_string().contains("boom"));
    }
}
