//! ProfileUpdateService - serialized belief updates per user.
//!
//! The belief updater itself is pure; this service supplies the
//! single-writer-per-user discipline around it. Concurrent feedback for
//! the same user queues on a per-user lock so no update is lost;
//! different users proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::application::CoreEngine;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::learning::UserFeedback;
use crate::domain::scoring::ValueProfile;
use crate::ports::{ProfileStore, StoreError};

/// Errors from the feedback submission path.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("No profile exists for user {0}")]
    ProfileNotFound(UserId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies feedback to stored profiles, one update in flight per user.
pub struct ProfileUpdateService {
    engine: Arc<CoreEngine>,
    store: Arc<dyn ProfileStore>,
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl ProfileUpdateService {
    /// Creates a service over an engine and a profile store.
    pub fn new(engine: Arc<CoreEngine>, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            engine,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Applies one feedback event to the user's stored profile.
    ///
    /// Load, update, and save run under the user's lock, so concurrent
    /// submissions for the same user serialize and every event lands on
    /// the profile produced by the previous one.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn submit_feedback(
        &self,
        user_id: UserId,
        feedback: UserFeedback,
        now: Timestamp,
    ) -> Result<ValueProfile, UpdateError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let profile = self
            .store
            .load(&user_id)
            .await?
            .ok_or(UpdateError::ProfileNotFound(user_id))?;
        let next = self.engine.update(&profile, &feedback, now)?;
        self.store.save(&user_id, &next).await?;

        debug!(confidence = next.confidence.value(), "profile saved");
        Ok(next)
    }

    /// Applies a batch of engagement signals under the same per-user lock.
    pub async fn submit_engagement_batch(
        &self,
        user_id: UserId,
        signals: &[UserFeedback],
        now: Timestamp,
    ) -> Result<ValueProfile, UpdateError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let profile = self
            .store
            .load(&user_id)
            .await?
            .ok_or(UpdateError::ProfileNotFound(user_id))?;
        let next = self.engine.apply_engagement(&profile, signals, now)?;
        self.store.save(&user_id, &next).await?;
        Ok(next)
    }

    /// Returns the lock for a user, creating it on first use.
    ///
    /// The registry lock is held only long enough to fetch or insert the
    /// entry, never across an update.
    async fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(user_id).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileStore;
    use crate::config::{CoreConfig, ValueHierarchy};
    use crate::domain::foundation::{DecisionId, Rating};

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn service_with_profile(user_id: UserId) -> ProfileUpdateService {
        let engine = Arc::new(CoreEngine::new(Arc::new(CoreConfig::default())));
        let profile = ValueProfile::from_hierarchy(&ValueHierarchy::default(), now());
        let store = Arc::new(InMemoryProfileStore::with_profile(user_id, profile));
        ProfileUpdateService::new(engine, store)
    }

    fn rating_feedback(rating: i8) -> UserFeedback {
        UserFeedback::explicit(DecisionId::new(), Rating::try_new(rating).unwrap(), now())
    }

    #[tokio::test]
    async fn submit_feedback_updates_the_stored_profile() {
        let user_id = UserId::new();
        let service = service_with_profile(user_id);

        let next = service
            .submit_feedback(user_id, rating_feedback(-1), now())
            .await
            .unwrap();
        let weight = next.weight_of("productivity", "focus").unwrap().value();
        assert!((weight - 0.525).abs() < 1e-9);
    }

    #[tokio::test]
    async fn missing_profile_is_an_error() {
        let user_id = UserId::new();
        let service = service_with_profile(UserId::new());

        let result = service
            .submit_feedback(user_id, rating_feedback(0), now())
            .await;
        assert!(matches!(result, Err(UpdateError::ProfileNotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_feedback_for_one_user_serializes() {
        let user_id = UserId::new();
        let service = Arc::new(service_with_profile(user_id));

        let submissions = 20;
        let mut handles = Vec::new();
        for _ in 0..submissions {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .submit_feedback(user_id, rating_feedback(0), now())
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every event's confidence increment must have landed: no lost
        // updates under concurrency.
        let final_profile = service
            .submit_feedback(user_id, rating_feedback(0), now())
            .await
            .unwrap();
        let expected = 0.01 * (submissions + 1) as f64;
        assert!((final_profile.confidence.value() - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn updates_for_different_users_are_independent() {
        let engine = Arc::new(CoreEngine::new(Arc::new(CoreConfig::default())));
        let a = UserId::new();
        let b = UserId::new();
        let store = Arc::new(InMemoryProfileStore::new());
        let profile = ValueProfile::from_hierarchy(&ValueHierarchy::default(), now());
        store.save(&a, &profile).await.unwrap();
        store.save(&b, &profile).await.unwrap();
        let service = ProfileUpdateService::new(engine, store);

        service
            .submit_feedback(a, rating_feedback(-1), now())
            .await
            .unwrap();
        let b_profile = service
            .submit_feedback(b, rating_feedback(0), now())
            .await
            .unwrap();
        // B's weights are untouched by A's tightening.
        assert_eq!(
            b_profile.weight_of("productivity", "focus").unwrap().value(),
            0.5
        );
    }

    #[tokio::test]
    async fn engagement_batch_goes_through_the_same_lock() {
        let user_id = UserId::new();
        let service = service_with_profile(user_id);
        let signals: Vec<UserFeedback> = (0..10)
            .map(|_| {
                UserFeedback::engagement(
                    DecisionId::new(),
                    crate::domain::learning::EngagementAction::Dismissed,
                    None,
                    now(),
                )
            })
            .collect();

        let next = service
            .submit_engagement_batch(user_id, &signals, now())
            .await
            .unwrap();
        let weight = next.weight_of("productivity", "focus").unwrap().value();
        assert!(weight > 0.5);
    }
}
