//! Feature extraction over content metadata.
//!
//! Pure, infallible derivation of [`ContentFeatures`] from a content
//! item's title, domain, type, and metadata. Missing fields degrade to
//! neutral defaults; the extractor never rejects input.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::domain::content::{ContentFeatures, ContentItem, Tone};
use crate::domain::foundation::SignedScore;

/// Extracts scoring features from content items.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: Arc<ExtractionConfig>,
}

impl FeatureExtractor {
    /// Creates an extractor over the given lexicon configuration.
    pub fn new(config: Arc<ExtractionConfig>) -> Self {
        Self { config }
    }

    /// Extracts features from a content item.
    ///
    /// A pure function of the item's title, domain, content type, and
    /// metadata. Never fails: content without a usable title yields
    /// neutral features with only the domain reputation populated.
    pub fn extract(&self, content: &ContentItem) -> ContentFeatures {
        let title = content.title_lower();

        let mut features = ContentFeatures::neutral(content.content_id.clone());
        features.domain_reputation = self.domain_reputation(&content.domain);

        if title.trim().is_empty() {
            features.topics = self.metadata_topics(content);
            return features;
        }

        features.topics = self.extract_topics(&title);
        features.topics.append(&mut self.metadata_topics(content));
        features.tone = self.analyze_tone(&title);
        features.emotional_valence = self.estimate_valence(&title);
        features.is_promotional = self.is_promotional(&title);
        features.is_clickbait = self.is_clickbait(&content.title, &title);
        features
    }

    /// Topic hints supplied by the source, normalized to lowercase.
    fn metadata_topics(&self, content: &ContentItem) -> BTreeSet<String> {
        content
            .metadata
            .topics
            .iter()
            .map(|t| t.to_lowercase())
            .collect()
    }

    fn extract_topics(&self, title: &str) -> BTreeSet<String> {
        self.config
            .topic_keywords
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|kw| title.contains(kw.as_str())))
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    fn analyze_tone(&self, title: &str) -> Tone {
        let contains_any =
            |markers: &[String]| markers.iter().any(|m| title.contains(m.as_str()));

        if contains_any(&self.config.sensational_markers) {
            Tone::Sensational
        } else if contains_any(&self.config.educational_markers) {
            Tone::Educational
        } else if contains_any(&self.config.news_markers) {
            Tone::News
        } else {
            Tone::Neutral
        }
    }

    fn estimate_valence(&self, title: &str) -> SignedScore {
        let negative = self
            .config
            .negative_words
            .iter()
            .filter(|w| title.contains(w.as_str()))
            .count() as f64;
        let positive = self
            .config
            .positive_words
            .iter()
            .filter(|w| title.contains(w.as_str()))
            .count() as f64;

        let total = negative + positive;
        if total == 0.0 {
            return SignedScore::NEUTRAL;
        }
        SignedScore::new((positive - negative) / total)
    }

    fn is_promotional(&self, title: &str) -> bool {
        self.config
            .promotional_phrases
            .iter()
            .any(|p| title.contains(p.as_str()))
    }

    /// Clickbait is a deterministic check: curiosity-gap phrase present,
    /// or punctuation counts above the configured thresholds.
    fn is_clickbait(&self, raw_title: &str, title: &str) -> bool {
        if self
            .config
            .clickbait_phrases
            .iter()
            .any(|p| title.contains(p.as_str()))
        {
            return true;
        }

        let exclamations = raw_title.matches('!').count() as u32;
        let questions = raw_title.matches('?').count() as u32;
        exclamations > self.config.max_exclamations || questions > self.config.max_question_marks
    }

    fn domain_reputation(&self, domain: &str) -> SignedScore {
        if domain.trim().is_empty() {
            return SignedScore::NEUTRAL;
        }
        if self.config.is_boosted(domain) {
            SignedScore::new(self.config.boosted_reputation)
        } else if self.config.is_penalized(domain) {
            SignedScore::new(self.config.penalized_reputation)
        } else {
            SignedScore::NEUTRAL
        }
    }
}
