//! Content type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of content source being evaluated.
///
/// Unrecognized types deserialize as [`ContentType::Unknown`] and score
/// neutrally; feature extraction is intentionally permissive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Video,
    SocialPost,
    Message,
    Notification,
    Email,
    Website,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ContentType {
    /// Returns the wire representation of this content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Video => "video",
            ContentType::SocialPost => "social_post",
            ContentType::Message => "message",
            ContentType::Notification => "notification",
            ContentType::Email => "email",
            ContentType::Website => "website",
            ContentType::Unknown => "unknown",
        }
    }

    /// Parses a content type, falling back to `Unknown` for unrecognized input.
    pub fn parse(s: &str) -> Self {
        match s {
            "article" => ContentType::Article,
            "video" => ContentType::Video,
            "social_post" => ContentType::SocialPost,
            "message" => ContentType::Message,
            "notification" => ContentType::Notification,
            "email" => ContentType::Email,
            "website" => ContentType::Website,
            _ => ContentType::Unknown,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_serializes_snake_case() {
        let json = serde_json::to_string(&ContentType::SocialPost).unwrap();
        assert_eq!(json, "\"social_post\"");
    }

    #[test]
    fn content_type_deserializes_known_values() {
        let ct: ContentType = serde_json::from_str("\"article\"").unwrap();
        assert_eq!(ct, ContentType::Article);
    }

    #[test]
    fn unknown_values_deserialize_to_unknown() {
        let ct: ContentType = serde_json::from_str("\"podcast\"").unwrap();
        assert_eq!(ct, ContentType::Unknown);
    }

    #[test]
    fn parse_falls_back_to_unknown() {
        assert_eq!(ContentType::parse("video"), ContentType::Video);
        assert_eq!(ContentType::parse("hologram"), ContentType::Unknown);
    }

    #[test]
    fn parse_roundtrips_as_str() {
        for ct in [
            ContentType::Article,
            ContentType::Video,
            ContentType::SocialPost,
            ContentType::Message,
            ContentType::Notification,
            ContentType::Email,
            ContentType::Website,
            ContentType::Unknown,
        ] {
            assert_eq!(ContentType::parse(ct.as_str()), ct);
        }
    }
}
