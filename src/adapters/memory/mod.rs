//! In-memory store adapters.
//!
//! Deterministic reference implementations of the persistence ports,
//! used by the integration tests and available to embedding hosts that
//! do not need durable storage.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. Acceptable for test
//! and reference use; durable hosts bring their own adapters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::decision::InterventionDecision;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::learning::UserFeedback;
use crate::domain::scoring::ValueProfile;
use crate::ports::{DecisionStore, ProfileStore, StoreError};

/// In-memory profile store keyed by user.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, ValueProfile>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with one profile (test helper).
    pub fn with_profile(user_id: UserId, profile: ValueProfile) -> Self {
        let store = Self::new();
        store
            .profiles
            .write()
            .expect("InMemoryProfileStore: lock poisoned")
            .insert(user_id, profile);
        store
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .expect("InMemoryProfileStore: lock poisoned")
            .len()
    }

    /// Returns true when no profile is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<ValueProfile>, StoreError> {
        Ok(self
            .profiles
            .read()
            .expect("InMemoryProfileStore: lock poisoned")
            .get(user_id)
            .cloned())
    }

    async fn save(&self, user_id: &UserId, profile: &ValueProfile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .expect("InMemoryProfileStore: lock poisoned")
            .insert(*user_id, profile.clone());
        Ok(())
    }
}

/// In-memory decision and feedback log keyed by user.
#[derive(Default)]
pub struct InMemoryDecisionStore {
    decisions: RwLock<HashMap<UserId, Vec<InterventionDecision>>>,
    feedback: RwLock<HashMap<UserId, Vec<UserFeedback>>>,
}

impl InMemoryDecisionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total decisions recorded for a user (test helper).
    pub fn decision_count(&self, user_id: &UserId) -> usize {
        self.decisions
            .read()
            .expect("InMemoryDecisionStore: lock poisoned")
            .get(user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DecisionStore for InMemoryDecisionStore {
    async fn append_decision(
        &self,
        user_id: &UserId,
        decision: &InterventionDecision,
    ) -> Result<(), StoreError> {
        self.decisions
            .write()
            .expect("InMemoryDecisionStore: lock poisoned")
            .entry(*user_id)
            .or_default()
            .push(decision.clone());
        Ok(())
    }

    async fn record_feedback(
        &self,
        user_id: &UserId,
        feedback: &UserFeedback,
    ) -> Result<(), StoreError> {
        self.feedback
            .write()
            .expect("InMemoryDecisionStore: lock poisoned")
            .entry(*user_id)
            .or_default()
            .push(feedback.clone());
        Ok(())
    }

    async fn window(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<(Vec<InterventionDecision>, Vec<UserFeedback>), StoreError> {
        let decisions = self
            .decisions
            .read()
            .expect("InMemoryDecisionStore: lock poisoned")
            .get(user_id)
            .map(|all| {
                all.iter()
                    .filter(|d| !d.timestamp.is_before(&since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let feedback = self
            .feedback
            .read()
            .expect("InMemoryDecisionStore: lock poisoned")
            .get(user_id)
            .map(|all| {
                all.iter()
                    .filter(|f| !f.timestamp.is_before(&since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok((decisions, feedback))
    }
}
