//! Content item and metadata types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContentId, ContentType, Timestamp, ValidationError};

/// Optional metadata accompanying a content item.
///
/// Every field may be absent; extraction degrades gracefully to neutral
/// defaults when metadata is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContentMetadata {
    pub author: Option<String>,
    pub published_at: Option<Timestamp>,
    pub estimated_read_time_seconds: Option<u32>,
    /// Topic hints supplied by the source, merged with extracted topics.
    pub topics: Vec<String>,
    pub keywords: Vec<String>,
    pub language: Option<String>,
}

impl ContentMetadata {
    /// Returns true when no metadata field carries information.
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.published_at.is_none()
            && self.estimated_read_time_seconds.is_none()
            && self.topics.is_empty()
            && self.keywords.is_empty()
            && self.language.is_none()
    }
}

/// A piece of content submitted for evaluation.
///
/// Immutable once scored; the host owns identity and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub content_id: ContentId,
    /// Source locator: URL, app event id, message id.
    pub source: String,
    pub title: String,
    pub content_type: ContentType,
    pub domain: String,
    #[serde(default)]
    pub metadata: ContentMetadata,
}

impl ContentItem {
    /// Creates a content item, rejecting records with neither title nor domain.
    pub fn new(
        content_id: ContentId,
        source: impl Into<String>,
        title: impl Into<String>,
        content_type: ContentType,
        domain: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            content_id,
            source: source.into(),
            title: title.into(),
            content_type,
            domain: domain.into(),
            metadata: ContentMetadata::default(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Attaches metadata to the item.
    pub fn with_metadata(mut self, metadata: ContentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Checks the caller contract: a content item must carry at least a
    /// title or a domain to be scoreable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() && self.domain.trim().is_empty() {
            return Err(ValidationError::invalid_format(
                "content",
                "neither title nor domain is set",
            ));
        }
        Ok(())
    }

    /// Returns the domain lowercased for case-insensitive comparisons.
    pub fn domain_lower(&self) -> String {
        self.domain.to_lowercase()
    }

    /// Returns the title lowercased for keyword matching.
    pub fn title_lower(&self) -> String {
        self.title.to_lowercase()
    }
}
