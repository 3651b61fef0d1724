//! Value-alignment scoring.
//!
//! Combines extracted features with a user's value profile to produce
//! per-dimension and aggregate alignment, productivity and wellbeing
//! impact estimates, and a recommended action.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{DimensionRole, ScoringConfig};
use crate::domain::content::{ContentFeatures, ContentItem, Tone};
use crate::domain::foundation::{
    ContentId, ContentType, InterventionAction, SignedScore, UnitScore,
};
use crate::domain::scoring::ValueProfile;

// Per-role alignment levels. Roles map feature evidence to a score in
// [0, 1]; the levels below are the fixed points of that mapping.
const LEARNING_HIGH: f64 = 0.8;
const LEARNING_LOW: f64 = 0.3;
const LEARNING_SUPPRESSED: f64 = 0.2;
const LEARNING_SOURCE_BONUS: f64 = 0.15;
const FOCUS_HIGH: f64 = 0.8;
const FOCUS_LOW: f64 = 0.2;
const RESTFUL_HIGH: f64 = 0.7;
const RESTFUL_LOW: f64 = 0.2;
const QUALITY_HIGH: f64 = 0.9;
const QUALITY_SUSPECT: f64 = 0.3;
const QUALITY_LOW: f64 = 0.4;
const NEUTRAL_SCORE: f64 = 0.5;

/// Valence below this marks content as distressing for restfulness.
const DISTRESS_VALENCE: f64 = -0.3;

/// Result of scoring a content item against a value profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub content_id: ContentId,
    /// Aggregate alignment with the profile, 0.5 when unweighted.
    pub alignment_score: UnitScore,
    pub productivity_impact: SignedScore,
    pub wellbeing_impact: SignedScore,
    pub confidence: UnitScore,
    /// Alignment per "category.dimension" key.
    pub dimension_scores: BTreeMap<String, UnitScore>,
    pub reasoning: String,
    pub recommended_action: InterventionAction,
}

/// Scores content against user value profiles.
#[derive(Debug, Clone)]
pub struct ValueScorer {
    config: Arc<ScoringConfig>,
}

impl ValueScorer {
    /// Creates a scorer over the given configuration.
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }

    /// Scores a content item against a profile.
    ///
    /// Total over validated inputs: dimensions absent from the profile
    /// simply do not contribute, and an unweighted profile yields the
    /// neutral alignment 0.5.
    pub fn score(
        &self,
        content: &ContentItem,
        features: &ContentFeatures,
        profile: &ValueProfile,
    ) -> ScoringResult {
        let dimension_scores = self.dimension_scores(content, features, profile);
        let alignment_score = self.aggregate_alignment(profile, &dimension_scores);
        let productivity_impact = self.productivity_impact(features);
        let wellbeing_impact = self.wellbeing_impact(features);
        let confidence = self.confidence(profile, features);
        let recommended_action = self.recommend_action(alignment_score, wellbeing_impact);
        let reasoning = self.reasoning(alignment_score, productivity_impact, wellbeing_impact);

        ScoringResult {
            content_id: content.content_id.clone(),
            alignment_score,
            productivity_impact,
            wellbeing_impact,
            confidence,
            dimension_scores,
            reasoning,
            recommended_action,
        }
    }

    /// Alignment per weighted profile dimension, keyed "category.dimension".
    fn dimension_scores(
        &self,
        content: &ContentItem,
        features: &ContentFeatures,
        profile: &ValueProfile,
    ) -> BTreeMap<String, UnitScore> {
        profile
            .weighted_dimensions()
            .map(|(category, dimension, _)| {
                let role = self.config.hierarchy.role_of(category, dimension);
                let score = self.role_score(role, content, features);
                (format!("{category}.{dimension}"), UnitScore::new(score))
            })
            .collect()
    }

    /// Deterministic per-role alignment from feature evidence.
    fn role_score(
        &self,
        role: DimensionRole,
        content: &ContentItem,
        features: &ContentFeatures,
    ) -> f64 {
        let suspect = features.is_clickbait || features.domain_reputation.is_negative();
        match role {
            DimensionRole::Learning => {
                if suspect {
                    return LEARNING_SUPPRESSED;
                }
                let is_learning = content.content_type == ContentType::Article
                    || features.tone == Tone::Educational
                    || features
                        .topics
                        .iter()
                        .any(|t| self.config.learning_topics.iter().any(|lt| lt == t));
                if is_learning {
                    let bonus = if features.domain_reputation.is_positive() {
                        LEARNING_SOURCE_BONUS
                    } else {
                        0.0
                    };
                    (LEARNING_HIGH + bonus).min(1.0)
                } else {
                    LEARNING_LOW
                }
            }
            DimensionRole::Focus => {
                if suspect {
                    FOCUS_LOW
                } else {
                    FOCUS_HIGH
                }
            }
            DimensionRole::Restfulness => {
                let distressing = features.emotional_valence.value() < DISTRESS_VALENCE
                    || (features.tone == Tone::Sensational
                        && !features.emotional_valence.is_positive());
                if distressing {
                    RESTFUL_LOW
                } else {
                    RESTFUL_HIGH
                }
            }
            DimensionRole::SourceQuality => {
                if features.domain_reputation.is_positive() {
                    QUALITY_HIGH
                } else if suspect {
                    QUALITY_SUSPECT
                } else {
                    QUALITY_LOW
                }
            }
            DimensionRole::Neutral => NEUTRAL_SCORE,
        }
    }

    /// Confidence-weighted average of dimension scores by profile weight:
    /// `Σ(weight_d * score_d) / Σ(weight_d)`, 0.5 when nothing is weighted.
    fn aggregate_alignment(
        &self,
        profile: &ValueProfile,
        dimension_scores: &BTreeMap<String, UnitScore>,
    ) -> UnitScore {
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        for (category, dimension, weight) in profile.weighted_dimensions() {
            let key = format!("{category}.{dimension}");
            if let Some(score) = dimension_scores.get(&key) {
                weighted_sum += weight.value() * score.value();
                weight_sum += weight.value();
            }
        }
        if weight_sum == 0.0 {
            return UnitScore::NEUTRAL;
        }
        UnitScore::new(weighted_sum / weight_sum)
    }

    /// Productivity impact driven by domain category and title flags,
    /// independent of the alignment aggregate.
    fn productivity_impact(&self, features: &ContentFeatures) -> SignedScore {
        let impacts = &self.config.impacts;
        let mut total = 0.0;
        if features.domain_reputation.is_positive() {
            total += impacts.boosted_productivity_bonus;
        }
        if features.domain_reputation.is_negative() {
            total += impacts.penalized_productivity_penalty;
        }
        if features.is_clickbait {
            total += impacts.clickbait_productivity_penalty;
        }
        if features.is_promotional {
            total += impacts.promotional_productivity_penalty;
        }
        SignedScore::new(total)
    }

    /// Wellbeing impact driven by emotional valence and tone.
    fn wellbeing_impact(&self, features: &ContentFeatures) -> SignedScore {
        let impacts = &self.config.impacts;
        let mut total = features.emotional_valence.value() * impacts.valence_wellbeing_weight;
        if features.tone == Tone::Sensational && features.emotional_valence.is_negative() {
            total += impacts.sensational_wellbeing_penalty;
        }
        if features.domain_reputation.is_negative() {
            total += impacts.penalized_wellbeing_penalty;
        }
        SignedScore::new(total)
    }

    /// Profile confidence, down-weighted for low-information content.
    fn confidence(&self, profile: &ValueProfile, features: &ContentFeatures) -> UnitScore {
        let factor = if features.is_low_information() {
            self.config.low_information_factor
        } else {
            1.0
        };
        UnitScore::new(profile.confidence.value() * factor)
    }

    /// Threshold-band action recommendation. Boundary scores take the
    /// more permissive band.
    fn recommend_action(
        &self,
        alignment: UnitScore,
        wellbeing: SignedScore,
    ) -> InterventionAction {
        let bands = &self.config.bands;
        let alignment = alignment.value();
        let wellbeing = wellbeing.value();

        if alignment >= bands.prioritize_min && wellbeing >= bands.prioritize_wellbeing_floor {
            InterventionAction::AllowPrioritize
        } else if alignment >= bands.allow_min {
            InterventionAction::Allow
        } else if alignment > bands.warn_min {
            if wellbeing < bands.mute_wellbeing_ceiling {
                InterventionAction::AllowMute
            } else {
                InterventionAction::AllowWarning
            }
        } else {
            InterventionAction::Block
        }
    }

    fn reasoning(
        &self,
        alignment: UnitScore,
        productivity: SignedScore,
        wellbeing: SignedScore,
    ) -> String {
        let band = if alignment.value() > 0.7 {
            "High alignment with your values"
        } else if alignment.value() > 0.4 {
            "Moderate alignment with your values"
        } else {
            "Low alignment with your values"
        };

        let mut parts = vec![format!("{band} (alignment {alignment})")];
        if productivity.value() > 0.3 {
            parts.push(format!("likely increases productivity ({productivity})"));
        } else if productivity.value() < -0.3 {
            parts.push(format!("likely decreases productivity ({productivity})"));
        }
        if wellbeing.value() < -0.2 {
            parts.push(format!("may negatively affect wellbeing ({wellbeing})"));
        }
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueHierarchy;
    use crate::domain::extraction::FeatureExtractor;
    use crate::domain::foundation::{ContentType, Timestamp};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn scorer() -> ValueScorer {
        ValueScorer::new(Arc::new(ScoringConfig::default()))
    }

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(Arc::new(crate::config::ExtractionConfig::default()))
    }

    fn item(title: &str, domain: &str, content_type: ContentType) -> ContentItem {
        ContentItem::new(
            ContentId::try_new("c-1").unwrap(),
            "https://example.com",
            title,
            content_type,
            domain,
        )
        .unwrap()
    }

    fn profile_with(entries: &[(&str, &str, f64)], confidence: f64) -> ValueProfile {
        let mut values: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (category, dimension, weight) in entries {
            values
                .entry((*category).to_string())
                .or_default()
                .insert((*dimension).to_string(), *weight);
        }
        ValueProfile::try_from_weights(values, confidence, now()).unwrap()
    }

    fn neutral_profile() -> ValueProfile {
        ValueProfile::from_hierarchy(&ValueHierarchy::default(), now())
    }

    #[test]
    fn unweighted_profile_scores_neutral_alignment() {
        let content = item("Any title", "example.com", ContentType::Article);
        let features = extractor().extract(&content);
        let result = scorer().score(&content, &features, &ValueProfile::empty(now()));
        assert_eq!(result.alignment_score, UnitScore::NEUTRAL);

        let zeroed = profile_with(&[("productivity", "focus", 0.0)], 0.5);
        let result = scorer().score(&content, &features, &zeroed);
        assert_eq!(result.alignment_score, UnitScore::NEUTRAL);
    }

    #[test]
    fn alignment_is_weight_normalized_average() {
        // focus scores 0.8 on clean content, learning 0.95 on a boosted
        // article; weighting learning 3x pulls the average toward it.
        let content = item("A title", "arxiv.org", ContentType::Article);
        let features = extractor().extract(&content);
        let profile = profile_with(
            &[
                ("productivity", "focus", 0.2),
                ("productivity", "learning", 0.6),
            ],
            0.5,
        );
        let result = scorer().score(&content, &features, &profile);
        let expected = (0.2 * 0.8 + 0.6 * 0.95) / 0.8;
        assert!((result.alignment_score.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn learning_profile_prioritizes_survey_article() {
        let content = item(
            "Survey of Transformer Architectures",
            "arxiv.org",
            ContentType::Article,
        );
        let features = extractor().extract(&content);
        let profile = profile_with(&[("productivity", "learning", 0.9)], 0.6);
        let result = scorer().score(&content, &features, &profile);

        assert!(result.alignment_score.value() > 0.8);
        assert_eq!(
            result.recommended_action,
            InterventionAction::AllowPrioritize
        );
    }

    #[test]
    fn clickbait_article_scores_below_block_threshold_for_neutral_profile() {
        let content = item(
            "10 SHOCKING facts you won't believe",
            "clickbait.net",
            ContentType::Article,
        );
        let features = extractor().extract(&content);
        assert!(features.is_clickbait);

        let result = scorer().score(&content, &features, &neutral_profile());
        assert!(result.alignment_score.value() < 0.3);
        assert_eq!(result.recommended_action, InterventionAction::Block);
        assert!(result.wellbeing_impact.value() <= 0.0);
    }

    #[test]
    fn missing_profile_dimensions_do_not_contribute() {
        let content = item("A title", "example.com", ContentType::Article);
        let features = extractor().extract(&content);
        // Dimension outside the configured hierarchy: role defaults to
        // neutral, nothing raises.
        let profile = profile_with(&[("hobbies", "juggling", 0.9)], 0.5);
        let result = scorer().score(&content, &features, &profile);
        assert_eq!(result.alignment_score.value(), 0.5);
    }

    #[test]
    fn boundary_alignment_takes_more_permissive_action() {
        let bands = ScoringConfig::default().bands;
        let scorer = scorer();

        // Exactly at the prioritize edge with acceptable wellbeing.
        let action = scorer.recommend_action(
            UnitScore::new(bands.prioritize_min),
            SignedScore::new(0.0),
        );
        assert_eq!(action, InterventionAction::AllowPrioritize);

        // Exactly at the allow edge.
        let action =
            scorer.recommend_action(UnitScore::new(bands.allow_min), SignedScore::new(0.0));
        assert_eq!(action, InterventionAction::Allow);

        // Exactly at the warn edge blocks, per the band definition.
        let action =
            scorer.recommend_action(UnitScore::new(bands.warn_min), SignedScore::new(0.0));
        assert_eq!(action, InterventionAction::Block);
    }

    #[test]
    fn low_wellbeing_mutes_midband_content() {
        let scorer = scorer();
        let action = scorer.recommend_action(UnitScore::new(0.4), SignedScore::new(-0.5));
        assert_eq!(action, InterventionAction::AllowMute);

        let action = scorer.recommend_action(UnitScore::new(0.4), SignedScore::new(-0.1));
        assert_eq!(action, InterventionAction::AllowWarning);
    }

    #[test]
    fn poor_wellbeing_downgrades_prioritization_to_allow() {
        let scorer = scorer();
        let action = scorer.recommend_action(UnitScore::new(0.9), SignedScore::new(-0.5));
        assert_eq!(action, InterventionAction::Allow);
    }

    #[test]
    fn low_information_content_downweights_confidence() {
        let content = item("", "unlisted.example", ContentType::Notification);
        let features = extractor().extract(&content);
        assert!(features.is_low_information());

        let profile = profile_with(&[("productivity", "focus", 0.5)], 0.8);
        let result = scorer().score(&content, &features, &profile);
        assert!((result.confidence.value() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn reasoning_embeds_alignment_band_and_numbers() {
        let content = item(
            "Fraud scandal destroyed the market",
            "twitter.com",
            ContentType::SocialPost,
        );
        let features = extractor().extract(&content);
        let result = scorer().score(&content, &features, &neutral_profile());
        assert!(result.reasoning.contains("alignment"));
        assert!(result.reasoning.contains("wellbeing"));
    }

    proptest! {
        #[test]
        fn scores_stay_in_declared_ranges(
            weight in 0.0f64..=1.0,
            confidence in 0.0f64..=1.0,
            title in "[a-zA-Z !?]{0,60}",
            domain in prop::sample::select(vec![
                "arxiv.org", "twitter.com", "example.com", "clickbait.net",
            ]),
        ) {
            let content = ContentItem::new(
                ContentId::try_new("c-p").unwrap(),
                "src",
                title,
                ContentType::Article,
                domain,
            );
            prop_assume!(content.is_ok());
            let content = content.unwrap();
            let features = extractor().extract(&content);
            let profile = profile_with(&[("productivity", "learning", weight)], confidence);
            let result = scorer().score(&content, &features, &profile);

            prop_assert!((0.0..=1.0).contains(&result.alignment_score.value()));
            prop_assert!((-1.0..=1.0).contains(&result.productivity_impact.value()));
            prop_assert!((-1.0..=1.0).contains(&result.wellbeing_impact.value()));
            prop_assert!((0.0..=1.0).contains(&result.confidence.value()));
        }
    }
}
