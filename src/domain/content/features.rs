//! Derived content features.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::{ContentId, SignedScore};

/// Tone category detected from the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Educational,
    Sensational,
    News,
    Neutral,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Tone {
    /// Returns the wire representation of this tone.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Educational => "educational",
            Tone::Sensational => "sensational",
            Tone::News => "news",
            Tone::Neutral => "neutral",
            Tone::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Features extracted from a content item.
///
/// Derived data: never stored independently of the content it was
/// extracted from, hence the embedded content id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFeatures {
    pub content_id: ContentId,
    pub topics: BTreeSet<String>,
    pub tone: Tone,
    pub emotional_valence: SignedScore,
    pub is_clickbait: bool,
    pub is_promotional: bool,
    /// Reputation on [-1, 1]: boosted domains positive, penalized
    /// negative, unmatched neutral zero.
    pub domain_reputation: SignedScore,
}

impl ContentFeatures {
    /// Neutral feature set for content with no extractable signal.
    pub fn neutral(content_id: ContentId) -> Self {
        Self {
            content_id,
            topics: BTreeSet::new(),
            tone: Tone::Unknown,
            emotional_valence: SignedScore::NEUTRAL,
            is_clickbait: false,
            is_promotional: false,
            domain_reputation: SignedScore::NEUTRAL,
        }
    }

    /// Returns true when nearly every feature sits at its neutral default.
    ///
    /// Low-information content down-weights scoring confidence.
    pub fn is_low_information(&self) -> bool {
        self.topics.is_empty()
            && matches!(self.tone, Tone::Unknown | Tone::Neutral)
            && self.emotional_valence == SignedScore::NEUTRAL
            && self.domain_reputation == SignedScore::NEUTRAL
            && !self.is_clickbait
            && !self.is_promotional
    }

    /// Human-readable one-line summary of the extracted features.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.topics.is_empty() {
            let topics: Vec<&str> = self.topics.iter().map(String::as_str).collect();
            parts.push(format!("Topics: {}", topics.join(", ")));
        }
        if !matches!(self.tone, Tone::Neutral | Tone::Unknown) {
            parts.push(format!("Tone: {}", self.tone));
        }
        if self.is_clickbait {
            parts.push("Potential clickbait".to_string());
        }
        if self.is_promotional {
            parts.push("Promotional content".to_string());
        }
        if parts.is_empty() {
            "Generic content".to_string()
        } else {
            parts.join(" | ")
        }
    }
}
