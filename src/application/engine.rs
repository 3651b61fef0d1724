//! CoreEngine - the evaluation core's host-facing facade.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::domain::content::ContentItem;
use crate::domain::decision::{DecisionSynthesizer, InterventionDecision};
use crate::domain::extraction::FeatureExtractor;
use crate::domain::foundation::{DecisionId, Timestamp, UserId, ValidationError};
use crate::domain::learning::{
    AnalysisWindow, BehaviorSignals, BehavioralAnalyzer, BeliefUpdater, UpdateSchedule,
    UserFeedback,
};
use crate::domain::rules::{InterventionRule, RuleEvaluator};
use crate::domain::scoring::{ValueProfile, ValueScorer};

/// The three call contracts of the evaluation core: evaluate, update,
/// analyze.
///
/// Construction wires every component to its slice of the configuration;
/// after that the engine is read-only and freely shareable across
/// threads. The host supplies identifiers and timestamps, persists all
/// entities, and serializes profile updates per user (see
/// [`ProfileUpdateService`](crate::application::ProfileUpdateService)).
#[derive(Debug, Clone)]
pub struct CoreEngine {
    extractor: FeatureExtractor,
    scorer: ValueScorer,
    synthesizer: DecisionSynthesizer,
    updater: BeliefUpdater,
    analyzer: BehavioralAnalyzer,
}

impl CoreEngine {
    /// Creates an engine over the given configuration.
    pub fn new(config: Arc<CoreConfig>) -> Self {
        Self {
            extractor: FeatureExtractor::new(Arc::new(config.extraction.clone())),
            scorer: ValueScorer::new(Arc::new(config.scoring.clone())),
            synthesizer: DecisionSynthesizer::new(config.decision),
            updater: BeliefUpdater::new(config.learning),
            analyzer: BehavioralAnalyzer::new(config.patterns),
        }
    }

    /// Evaluates one content item for one user: extract, score, match
    /// rules, decide.
    ///
    /// Synchronous, stateless beyond its inputs, and safe to run
    /// concurrently across users and content items; it reads but never
    /// writes the profile.
    ///
    /// # Errors
    ///
    /// Fails fast on caller contract violations: content with neither
    /// title nor domain, or a malformed rule.
    pub fn evaluate(
        &self,
        user_id: UserId,
        content: &ContentItem,
        profile: &ValueProfile,
        rules: &[InterventionRule],
        decision_id: DecisionId,
        now: Timestamp,
    ) -> Result<InterventionDecision, ValidationError> {
        content.validate()?;

        let features = self.extractor.extract(content);
        debug!(content_id = %content.content_id, features = %features.summary(), "features extracted");

        let scoring = self.scorer.score(content, &features, profile);
        let rule_match = RuleEvaluator::find_match(content, rules)?;
        let decision =
            self.synthesizer
                .decide(user_id, content, scoring, rule_match, decision_id, now);

        info!(
            decision_id = %decision.decision_id,
            content_id = %content.content_id,
            action = %decision.action,
            alignment = %decision.scoring.alignment_score,
            "content evaluated"
        );
        Ok(decision)
    }

    /// Applies one feedback event to a profile, returning the next
    /// profile. Pure; see [`BeliefUpdater::update`].
    pub fn update(
        &self,
        profile: &ValueProfile,
        feedback: &UserFeedback,
        now: Timestamp,
    ) -> Result<ValueProfile, ValidationError> {
        self.updater.update(profile, feedback, now)
    }

    /// Applies a batch of accumulated engagement signals, gated by the
    /// configured minimum event count.
    pub fn apply_engagement(
        &self,
        profile: &ValueProfile,
        signals: &[UserFeedback],
        now: Timestamp,
    ) -> Result<ValueProfile, ValidationError> {
        self.updater.apply_engagement(profile, signals, now)
    }

    /// Computes behavioral signals over a window of history.
    pub fn analyze(&self, window: &AnalysisWindow) -> BehaviorSignals {
        self.analyzer.analyze(window)
    }

    /// Recommends when the next belief update run should happen.
    pub fn update_schedule(&self, feedback_count: usize, days_since_update: i64) -> UpdateSchedule {
        self.updater.update_schedule(feedback_count, days_since_update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueHierarchy;
    use crate::domain::foundation::{
        ContentId, ContentType, InterventionAction, Rating, RuleId,
    };

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn engine() -> CoreEngine {
        CoreEngine::new(Arc::new(CoreConfig::default()))
    }

    fn neutral_profile() -> ValueProfile {
        ValueProfile::from_hierarchy(&ValueHierarchy::default(), now())
    }

    fn content(title: &str, domain: &str) -> ContentItem {
        ContentItem::new(
            ContentId::try_new("c-1").unwrap(),
            "src",
            title,
            ContentType::Article,
            domain,
        )
        .unwrap()
    }

    #[test]
    fn evaluate_runs_the_full_pipeline() {
        let decision = engine()
            .evaluate(
                UserId::new(),
                &content("A guide to deep work", "example.com"),
                &neutral_profile(),
                &[],
                DecisionId::new(),
                now(),
            )
            .unwrap();
        assert!(!decision.is_rule_sourced());
        assert!(!decision.reasoning.is_empty());
    }

    #[test]
    fn evaluate_rejects_malformed_content() {
        let mut bad = content("ok", "example.com");
        bad.title = String::new();
        bad.domain = String::new();
        let result = engine().evaluate(
            UserId::new(),
            &bad,
            &neutral_profile(),
            &[],
            DecisionId::new(),
            now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn evaluate_rejects_malformed_rules() {
        let mut rule = InterventionRule::for_domain(
            RuleId::new(),
            "example.com",
            InterventionAction::Block,
            0,
            "reason",
            now(),
        );
        rule.domain = None;
        let result = engine().evaluate(
            UserId::new(),
            &content("ok", "example.com"),
            &neutral_profile(),
            &[rule],
            DecisionId::new(),
            now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_delegates_to_the_belief_updater() {
        let profile = neutral_profile();
        let feedback = UserFeedback::explicit(DecisionId::new(), Rating::TOO_LENIENT, now());
        let next = engine().update(&profile, &feedback, now()).unwrap();
        assert!(next.confidence.value() > profile.confidence.value());
    }
}
