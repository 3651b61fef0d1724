//! Belief update configuration.
//!
//! The update factors are a configured smoothing heuristic, not a fitted
//! probabilistic model; treat every constant here as product tuning.

use serde::{Deserialize, Serialize};

/// Configuration for the belief updater.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Multiplier applied to weights on a "+1 / too strict" rating.
    pub soften_factor: f64,
    /// Multiplier applied to weights on a "-1 / too lenient" rating.
    pub tighten_factor: f64,
    /// Confidence gained per feedback event.
    pub confidence_increment: f64,
    /// Ceiling confidence can grow to; it never resets.
    pub confidence_cap: f64,
    /// Scale of implicit engagement nudges relative to explicit ratings.
    ///
    /// The effective factor for an engagement signal is
    /// `1 + engagement_scale * (factor - 1)`.
    pub engagement_scale: f64,
    /// Dwell time at or above this many seconds counts as engagement.
    pub engagement_dwell_secs: f64,
    /// Accumulated implicit signals apply only once at least this many
    /// feedback events exist, to avoid thrashing on single noisy events.
    pub min_feedback_events: usize,
    /// A value update is due after this many days regardless of volume.
    pub max_days_between_updates: i64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            soften_factor: 0.95,
            tighten_factor: 1.05,
            confidence_increment: 0.01,
            confidence_cap: 0.95,
            engagement_scale: 0.4,
            engagement_dwell_secs: 180.0,
            min_feedback_events: 10,
            max_days_between_updates: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factors_bracket_one() {
        let config = LearningConfig::default();
        assert!(config.soften_factor < 1.0);
        assert!(config.tighten_factor > 1.0);
    }

    #[test]
    fn default_confidence_cap_is_below_one() {
        let config = LearningConfig::default();
        assert!(config.confidence_cap < 1.0);
        assert!(config.confidence_increment > 0.0);
    }

    #[test]
    fn engagement_scale_shrinks_nudges() {
        let config = LearningConfig::default();
        assert!(config.engagement_scale > 0.0 && config.engagement_scale < 1.0);
    }
}
