//! Feature extraction configuration.
//!
//! All lexical material used by the extractor lives here rather than in
//! code: topic keyword tables, tone and valence lexicons, the clickbait
//! pattern set, and the domain reputation lists.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default topic keyword table: topic name to title keywords.
static DEFAULT_TOPIC_KEYWORDS: Lazy<BTreeMap<String, Vec<String>>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "technology",
            &["ai", "ml", "python", "javascript", "code", "tech", "app", "software"],
        ),
        (
            "business",
            &["startup", "business", "market", "sales", "ceo", "founder"],
        ),
        (
            "health",
            &["health", "medical", "nutrition", "exercise", "wellness"],
        ),
        (
            "science",
            &["research", "study", "experiment", "science", "physics"],
        ),
        (
            "productivity",
            &["productivity", "efficiency", "focus", "habit", "time"],
        ),
        (
            "finance",
            &["money", "stocks", "crypto", "investing", "financial"],
        ),
        (
            "entertainment",
            &["movie", "music", "game", "comedy", "funny"],
        ),
    ];
    table
        .iter()
        .map(|(topic, keywords)| {
            (
                (*topic).to_string(),
                keywords.iter().map(|k| (*k).to_string()).collect(),
            )
        })
        .collect()
});

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Configuration for the feature extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Topic name to keywords matched as substrings of the lowercased title.
    pub topic_keywords: BTreeMap<String, Vec<String>>,

    /// Markers indicating a sensational tone.
    pub sensational_markers: Vec<String>,
    /// Markers indicating an educational tone.
    pub educational_markers: Vec<String>,
    /// Markers indicating a news tone.
    pub news_markers: Vec<String>,

    /// Words contributing negative emotional valence.
    pub negative_words: Vec<String>,
    /// Words contributing positive emotional valence.
    pub positive_words: Vec<String>,

    /// Phrases indicating promotional content.
    pub promotional_phrases: Vec<String>,

    /// Curiosity-gap phrases marking clickbait titles.
    pub clickbait_phrases: Vec<String>,
    /// Exclamation marks beyond this count mark a title as clickbait.
    pub max_exclamations: u32,
    /// Question marks beyond this count mark a title as clickbait.
    pub max_question_marks: u32,

    /// Domains considered high-value sources.
    pub boosted_domains: Vec<String>,
    /// Domains considered distraction sources.
    pub penalized_domains: Vec<String>,
    /// Reputation assigned to boosted domains.
    pub boosted_reputation: f64,
    /// Reputation assigned to penalized domains.
    pub penalized_reputation: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            topic_keywords: DEFAULT_TOPIC_KEYWORDS.clone(),
            sensational_markers: strings(&[
                "shocking",
                "incredible",
                "unbelievable",
                "amazing",
                "worst",
                "best",
            ]),
            educational_markers: strings(&[
                "guide", "tutorial", "how to", "learn", "course", "explained",
            ]),
            news_markers: strings(&["breaking", "news", "announced", "released", "report"]),
            negative_words: strings(&[
                "crisis", "death", "destroyed", "failed", "worst", "tragic", "disaster",
                "attack", "lawsuit", "fraud", "scandal",
            ]),
            positive_words: strings(&[
                "amazing",
                "incredible",
                "success",
                "breakthrough",
                "love",
                "happy",
                "joy",
                "beautiful",
                "wonderful",
            ]),
            promotional_phrases: strings(&[
                "click here",
                "sign up",
                "limited offer",
                "buy now",
                "sponsored",
                "advertisement",
                "get yours",
                "exclusive offer",
            ]),
            clickbait_phrases: strings(&[
                "doctors hate",
                "you won't believe",
                "one weird trick",
                "will shock you",
                "what happened next",
            ]),
            max_exclamations: 3,
            max_question_marks: 2,
            boosted_domains: strings(&[
                "arxiv.org",
                "medium.com",
                "substack.com",
                "coursera.org",
                "edx.org",
                "github.com",
                "stackoverflow.com",
            ]),
            penalized_domains: strings(&[
                "twitter.com",
                "x.com",
                "tiktok.com",
                "reddit.com",
                "youtube.com",
                "instagram.com",
                "facebook.com",
                "twitch.tv",
            ]),
            boosted_reputation: 0.9,
            penalized_reputation: -0.6,
        }
    }
}

impl ExtractionConfig {
    /// Returns true when the domain is on the boosted list (case-insensitive).
    pub fn is_boosted(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.boosted_domains.iter().any(|d| d.eq_ignore_ascii_case(&domain))
    }

    /// Returns true when the domain is on the penalized list (case-insensitive).
    pub fn is_penalized(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.penalized_domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_topic_table() {
        let config = ExtractionConfig::default();
        assert!(config.topic_keywords.contains_key("technology"));
        assert!(config.topic_keywords.contains_key("science"));
    }

    #[test]
    fn domain_lists_match_case_insensitively() {
        let config = ExtractionConfig::default();
        assert!(config.is_boosted("ArXiv.org"));
        assert!(config.is_penalized("TWITTER.COM"));
        assert!(!config.is_boosted("example.com"));
        assert!(!config.is_penalized("example.com"));
    }

    #[test]
    fn reputation_defaults_sit_inside_signed_range() {
        let config = ExtractionConfig::default();
        assert!((-1.0..=1.0).contains(&config.boosted_reputation));
        assert!((-1.0..=1.0).contains(&config.penalized_reputation));
        assert!(config.boosted_reputation > 0.0);
        assert!(config.penalized_reputation < 0.0);
    }
}
