//! Decision synthesis: rule precedence, scoring fallback, safety constraint.

use tracing::debug;

use crate::config::DecisionConfig;
use crate::domain::content::ContentItem;
use crate::domain::decision::{InterventionDecision, MatchedRule};
use crate::domain::foundation::{DecisionId, InterventionAction, Timestamp, UserId};
use crate::domain::rules::InterventionRule;
use crate::domain::scoring::ScoringResult;

/// Merges rule evaluation and scoring output into a final decision.
///
/// State-free and deterministic: identical inputs (including the
/// caller-supplied decision id and timestamp) yield identical decisions.
#[derive(Debug, Clone)]
pub struct DecisionSynthesizer {
    config: DecisionConfig,
}

impl DecisionSynthesizer {
    /// Creates a synthesizer with the given policy configuration.
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// Synthesizes the final decision for a content item.
    ///
    /// A matched rule is authoritative over the scorer's recommendation.
    /// The safety constraint runs last and, unless `rules_always_win` is
    /// set, may override even a rule: content with strictly positive
    /// wellbeing impact is never blocked, only warned.
    pub fn decide(
        &self,
        user_id: UserId,
        content: &ContentItem,
        scoring: ScoringResult,
        rule_match: Option<&InterventionRule>,
        decision_id: DecisionId,
        now: Timestamp,
    ) -> InterventionDecision {
        let matched_rule = rule_match.map(MatchedRule::from);

        let (mut action, mut reasoning) = match &matched_rule {
            Some(rule) => (
                rule.action,
                format!(
                    "User rule {} (priority {}) matched: {} -> {}",
                    rule.rule_id, rule.priority, rule.reason, rule.action
                ),
            ),
            None => (scoring.recommended_action, scoring.reasoning.clone()),
        };

        if self.overrides_block(&matched_rule, action, &scoring) {
            action = InterventionAction::AllowWarning;
            reasoning = format!(
                "{reasoning}; safety constraint: content with positive wellbeing impact \
                 ({}) is never blocked, downgraded to {}",
                scoring.wellbeing_impact,
                InterventionAction::AllowWarning
            );
        }

        debug!(
            decision_id = %decision_id,
            action = %action,
            rule_sourced = matched_rule.is_some(),
            "decision synthesized"
        );

        InterventionDecision {
            decision_id,
            content_id: content.content_id.clone(),
            user_id,
            action,
            scoring,
            matched_rule,
            reasoning,
            timestamp: now,
        }
    }

    /// The safety constraint: BLOCK never survives strictly positive
    /// wellbeing impact. Rule-sourced blocks are exempt only under the
    /// opt-in `rules_always_win` policy.
    fn overrides_block(
        &self,
        matched_rule: &Option<MatchedRule>,
        action: InterventionAction,
        scoring: &ScoringResult,
    ) -> bool {
        if !action.is_block() || !scoring.wellbeing_impact.is_positive() {
            return false;
        }
        !(self.config.rules_always_win && matched_rule.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        ContentId, ContentType, RuleId, SignedScore, UnitScore,
    };
    use std::collections::BTreeMap;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn content() -> ContentItem {
        ContentItem::new(
            ContentId::try_new("c-1").unwrap(),
            "src",
            "Title",
            ContentType::Article,
            "twitter.com",
        )
        .unwrap()
    }

    fn scoring(
        alignment: f64,
        wellbeing: f64,
        recommended_action: InterventionAction,
    ) -> ScoringResult {
        ScoringResult {
            content_id: ContentId::try_new("c-1").unwrap(),
            alignment_score: UnitScore::new(alignment),
            productivity_impact: SignedScore::new(0.0),
            wellbeing_impact: SignedScore::new(wellbeing),
            confidence: UnitScore::new(0.5),
            dimension_scores: BTreeMap::new(),
            reasoning: format!("Scored at alignment {alignment:.2}"),
            recommended_action,
        }
    }

    fn block_rule(priority: i32) -> InterventionRule {
        InterventionRule::for_domain(
            RuleId::new(),
            "twitter.com",
            InterventionAction::Block,
            priority,
            "No social media",
            now(),
        )
    }

    fn synthesizer() -> DecisionSynthesizer {
        DecisionSynthesizer::new(DecisionConfig::default())
    }

    #[test]
    fn matched_rule_overrides_scoring_recommendation() {
        let rule = block_rule(100);
        let decision = synthesizer().decide(
            UserId::new(),
            &content(),
            scoring(0.9, -0.1, InterventionAction::AllowPrioritize),
            Some(&rule),
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::Block);
        assert!(decision.is_rule_sourced());
        assert!(decision.reasoning.contains(&rule.rule_id.to_string()));
        assert!(!decision.reasoning.contains("alignment"));
    }

    #[test]
    fn without_rule_the_scorer_recommendation_stands() {
        let decision = synthesizer().decide(
            UserId::new(),
            &content(),
            scoring(0.6, 0.0, InterventionAction::Allow),
            None,
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::Allow);
        assert!(decision.matched_rule.is_none());
        assert!(decision.reasoning.contains("alignment"));
    }

    #[test]
    fn positive_wellbeing_block_downgrades_to_warning() {
        let decision = synthesizer().decide(
            UserId::new(),
            &content(),
            scoring(0.2, 0.3, InterventionAction::Block),
            None,
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::AllowWarning);
        assert!(decision.reasoning.contains("safety constraint"));
    }

    #[test]
    fn safety_constraint_overrides_rule_block_by_default() {
        let rule = block_rule(100);
        let decision = synthesizer().decide(
            UserId::new(),
            &content(),
            scoring(0.9, 0.4, InterventionAction::Allow),
            Some(&rule),
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::AllowWarning);
        // The rule reference is preserved even when overridden.
        assert!(decision.is_rule_sourced());
    }

    #[test]
    fn rules_always_win_mode_exempts_rule_blocks() {
        let synthesizer = DecisionSynthesizer::new(DecisionConfig {
            rules_always_win: true,
        });
        let rule = block_rule(100);
        let decision = synthesizer.decide(
            UserId::new(),
            &content(),
            scoring(0.9, 0.4, InterventionAction::Allow),
            Some(&rule),
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::Block);

        // Scorer-sourced blocks still downgrade in this mode.
        let decision = synthesizer.decide(
            UserId::new(),
            &content(),
            scoring(0.2, 0.4, InterventionAction::Block),
            None,
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::AllowWarning);
    }

    #[test]
    fn zero_wellbeing_does_not_trigger_the_override() {
        let decision = synthesizer().decide(
            UserId::new(),
            &content(),
            scoring(0.2, 0.0, InterventionAction::Block),
            None,
            DecisionId::new(),
            now(),
        );
        assert_eq!(decision.action, InterventionAction::Block);
    }

    #[test]
    fn synthesis_is_idempotent_for_identical_inputs() {
        let user_id = UserId::new();
        let decision_id = DecisionId::new();
        let rule = block_rule(7);
        let content = content();

        let first = synthesizer().decide(
            user_id,
            &content,
            scoring(0.4, -0.2, InterventionAction::AllowWarning),
            Some(&rule),
            decision_id,
            now(),
        );
        let second = synthesizer().decide(
            user_id,
            &content,
            scoring(0.4, -0.2, InterventionAction::AllowWarning),
            Some(&rule),
            decision_id,
            now(),
        );
        assert_eq!(first, second);
    }
}
