//! Behavioral pattern analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the behavioral pattern analyzer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Window length for attention fragmentation, in minutes.
    pub fragmentation_window_minutes: i64,
    /// Mean dwell time below this many seconds indicates fragmentation.
    pub fragmentation_dwell_secs: f64,
    /// Switching frequency (events per minute) above this flags
    /// fragmented attention.
    pub switch_rate_per_minute: f64,
    /// Minimum observations before a domain preference is reported.
    pub min_domain_observations: usize,
    /// Cumulative shift in the confidence-weighted dimension average that
    /// counts as value drift.
    pub drift_delta: f64,
    /// Consecutive same-direction update windows required for drift.
    pub drift_windows: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            fragmentation_window_minutes: 60,
            fragmentation_dwell_secs: 30.0,
            switch_rate_per_minute: 1.0,
            min_domain_observations: 2,
            drift_delta: 0.15,
            drift_windows: 2,
        }
    }
}
