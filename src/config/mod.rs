//! Core configuration module
//!
//! Every tunable of the evaluation core lives in an explicit configuration
//! object passed into components at construction; nothing reads ambient
//! process state during evaluation. Defaults are complete, so
//! `CoreConfig::default()` is a fully working configuration. Environment
//! overrides load with the `ATTENTION_WARDEN` prefix and `__` separators
//! via the `config` crate.
//!
//! # Example
//!
//! ```no_run
//! use attention_warden::config::CoreConfig;
//!
//! let config = CoreConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod decision;
mod error;
mod extraction;
mod learning;
mod patterns;
mod scoring;

pub use decision::DecisionConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use extraction::ExtractionConfig;
pub use learning::LearningConfig;
pub use patterns::PatternConfig;
pub use scoring::{
    DimensionRole, ImpactWeights, ScoringConfig, ThresholdBands, ValueHierarchy,
};

use serde::{Deserialize, Serialize};

/// Root configuration for the evaluation core.
///
/// Serialize exists to feed the documented defaults into the config
/// builder as the base layer under environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    /// Feature extraction lexicons and domain lists.
    pub extraction: ExtractionConfig,

    /// Value hierarchy, threshold bands, impact weights.
    pub scoring: ScoringConfig,

    /// Decision synthesis policy.
    pub decision: DecisionConfig,

    /// Belief update factors and gates.
    pub learning: LearningConfig,

    /// Behavioral pattern thresholds.
    pub patterns: PatternConfig,
}

impl CoreConfig {
    /// Load configuration: documented defaults overlaid with environment
    /// variables.
    ///
    /// # Environment Variable Format
    ///
    /// - `ATTENTION_WARDEN__LEARNING__SOFTEN_FACTOR=0.9`
    /// - `ATTENTION_WARDEN__DECISION__RULES_ALWAYS_WIN=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if overrides cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::Environment::default()
                    .prefix("ATTENTION_WARDEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if any tunable is outside its
    /// documented range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let bands = &self.scoring.bands;
        if !(bands.prioritize_min > bands.allow_min
            && bands.allow_min > bands.warn_min
            && bands.warn_min > 0.0)
        {
            return Err(ConfigValidationError::UnorderedThresholdBands);
        }

        let learning = &self.learning;
        if !(learning.soften_factor > 0.0 && learning.soften_factor <= 1.0) {
            return Err(ConfigValidationError::InvalidSoftenFactor);
        }
        if learning.tighten_factor < 1.0 {
            return Err(ConfigValidationError::InvalidTightenFactor);
        }
        if learning.confidence_increment <= 0.0 {
            return Err(ConfigValidationError::InvalidConfidenceIncrement);
        }
        if !(learning.confidence_cap > 0.0 && learning.confidence_cap <= 1.0) {
            return Err(ConfigValidationError::InvalidConfidenceCap);
        }
        if !(learning.engagement_scale > 0.0 && learning.engagement_scale <= 1.0) {
            return Err(ConfigValidationError::InvalidEngagementScale);
        }

        let extraction = &self.extraction;
        if !((-1.0..=1.0).contains(&extraction.boosted_reputation)
            && (-1.0..=1.0).contains(&extraction.penalized_reputation))
        {
            return Err(ConfigValidationError::InvalidDomainReputation);
        }

        let factor = self.scoring.low_information_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigValidationError::InvalidLowInformationFactor);
        }

        if self.patterns.drift_windows == 0 {
            return Err(ConfigValidationError::InvalidDriftWindows);
        }

        Ok(())
    }
}
