//! Decision synthesis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the decision synthesizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DecisionConfig {
    /// When true, a rule-sourced BLOCK is exempt from the positive-wellbeing
    /// safety override.
    ///
    /// The default keeps the safety constraint authoritative: user rules
    /// can block, but not block strictly-positive-wellbeing content. Hosts
    /// that want explicit rules to always win opt in here.
    pub rules_always_win: bool,
}
