//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Threshold bands must be ordered: prioritize > allow > warn > 0")]
    UnorderedThresholdBands,

    #[error("Soften factor must be in (0, 1]")]
    InvalidSoftenFactor,

    #[error("Tighten factor must be at least 1")]
    InvalidTightenFactor,

    #[error("Confidence increment must be positive")]
    InvalidConfidenceIncrement,

    #[error("Confidence cap must be in (0, 1]")]
    InvalidConfidenceCap,

    #[error("Engagement scale must be in (0, 1]")]
    InvalidEngagementScale,

    #[error("Domain reputation values must be in [-1, 1]")]
    InvalidDomainReputation,

    #[error("Low information factor must be in (0, 1]")]
    InvalidLowInformationFactor,

    #[error("Drift detection requires at least one window")]
    InvalidDriftWindows,
}
