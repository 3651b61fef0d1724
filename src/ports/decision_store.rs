//! DecisionStore port for decision and feedback history.

use async_trait::async_trait;

use crate::domain::decision::InterventionDecision;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::learning::UserFeedback;

use super::StoreError;

/// Persistence contract for decisions and the feedback they receive.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Appends an immutable decision to a user's history.
    async fn append_decision(
        &self,
        user_id: &UserId,
        decision: &InterventionDecision,
    ) -> Result<(), StoreError>;

    /// Records feedback against a previously appended decision.
    async fn record_feedback(
        &self,
        user_id: &UserId,
        feedback: &UserFeedback,
    ) -> Result<(), StoreError>;

    /// Returns decisions and feedback recorded at or after `since`.
    async fn window(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<(Vec<InterventionDecision>, Vec<UserFeedback>), StoreError>;
}
