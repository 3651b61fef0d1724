//! User feedback on intervention decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DecisionId, Rating, Timestamp, ValidationError};

/// The kind of feedback signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    ExplicitRating,
    Engagement,
}

/// Observed user behavior toward decided content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementAction {
    Viewed,
    Dismissed,
    Ignored,
    SpentTime,
    Returned,
}

impl fmt::Display for EngagementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngagementAction::Viewed => "viewed",
            EngagementAction::Dismissed => "dismissed",
            EngagementAction::Ignored => "ignored",
            EngagementAction::SpentTime => "spent_time",
            EngagementAction::Returned => "returned",
        };
        write!(f, "{}", s)
    }
}

/// A single feedback event referencing a past decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    pub decision_id: DecisionId,
    pub feedback_type: FeedbackType,
    /// Set for explicit ratings: +1 too strict, -1 too lenient.
    pub rating: Option<Rating>,
    /// Set for engagement signals.
    pub action_taken: Option<EngagementAction>,
    pub time_spent_seconds: Option<f64>,
    pub timestamp: Timestamp,
}

impl UserFeedback {
    /// Creates an explicit rating feedback event.
    pub fn explicit(decision_id: DecisionId, rating: Rating, timestamp: Timestamp) -> Self {
        Self {
            decision_id,
            feedback_type: FeedbackType::ExplicitRating,
            rating: Some(rating),
            action_taken: None,
            time_spent_seconds: None,
            timestamp,
        }
    }

    /// Creates an implicit engagement feedback event.
    pub fn engagement(
        decision_id: DecisionId,
        action: EngagementAction,
        time_spent_seconds: Option<f64>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            decision_id,
            feedback_type: FeedbackType::Engagement,
            rating: None,
            action_taken: Some(action),
            time_spent_seconds,
            timestamp,
        }
    }

    /// Checks the caller contract: the payload must match the declared
    /// feedback type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.feedback_type {
            FeedbackType::ExplicitRating if self.rating.is_none() => Err(
                ValidationError::invalid_format("feedback", "explicit rating without a rating"),
            ),
            FeedbackType::Engagement if self.action_taken.is_none() => Err(
                ValidationError::invalid_format("feedback", "engagement without an action"),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    #[test]
    fn explicit_feedback_validates() {
        let feedback = UserFeedback::explicit(DecisionId::new(), Rating::TOO_STRICT, now());
        assert!(feedback.validate().is_ok());
    }

    #[test]
    fn engagement_feedback_validates() {
        let feedback = UserFeedback::engagement(
            DecisionId::new(),
            EngagementAction::SpentTime,
            Some(240.0),
            now(),
        );
        assert!(feedback.validate().is_ok());
    }

    #[test]
    fn explicit_feedback_without_rating_is_rejected() {
        let mut feedback = UserFeedback::explicit(DecisionId::new(), Rating::NEUTRAL, now());
        feedback.rating = None;
        assert!(feedback.validate().is_err());
    }

    #[test]
    fn engagement_without_action_is_rejected() {
        let mut feedback = UserFeedback::engagement(
            DecisionId::new(),
            EngagementAction::Viewed,
            None,
            now(),
        );
        feedback.action_taken = None;
        assert!(feedback.validate().is_err());
    }

    #[test]
    fn feedback_serializes_snake_case() {
        let feedback = UserFeedback::engagement(
            DecisionId::new(),
            EngagementAction::SpentTime,
            Some(10.0),
            now(),
        );
        let json = serde_json::to_string(&feedback).unwrap();
        assert!(json.contains("\"engagement\""));
        assert!(json.contains("\"spent_time\""));
    }
}
