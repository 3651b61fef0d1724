//! Intervention decision types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContentId, DecisionId, InterventionAction, RuleId, Timestamp, UserId,
};
use crate::domain::rules::InterventionRule;
use crate::domain::scoring::ScoringResult;

/// Reference to the rule that governed a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRule {
    pub rule_id: RuleId,
    pub action: InterventionAction,
    pub reason: String,
    pub priority: i32,
}

impl From<&InterventionRule> for MatchedRule {
    fn from(rule: &InterventionRule) -> Self {
        Self {
            rule_id: rule.rule_id,
            action: rule.action,
            reason: rule.reason.clone(),
            priority: rule.priority,
        }
    }
}

/// The final decision for a piece of content and a user.
///
/// Immutable once created; the host persists it and later annotates it
/// with observed user action and feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionDecision {
    pub decision_id: DecisionId,
    pub content_id: ContentId,
    pub user_id: UserId,
    pub action: InterventionAction,
    pub scoring: ScoringResult,
    /// Set when a user rule governed the action.
    pub matched_rule: Option<MatchedRule>,
    pub reasoning: String,
    pub timestamp: Timestamp,
}

impl InterventionDecision {
    /// Returns true when the action came from a user rule rather than
    /// the scorer.
    pub fn is_rule_sourced(&self) -> bool {
        self.matched_rule.is_some()
    }
}
