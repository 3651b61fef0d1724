//! ProfileStore port for value profile persistence.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::scoring::ValueProfile;

use super::StoreError;

/// Persistence contract for value profiles.
///
/// The host guarantees a load observes only fully-written profiles; the
/// update service guarantees one writer per user at a time.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Loads the profile for a user, if one exists.
    async fn load(&self, user_id: &UserId) -> Result<Option<ValueProfile>, StoreError>;

    /// Saves the profile for a user, replacing any previous version.
    async fn save(&self, user_id: &UserId, profile: &ValueProfile) -> Result<(), StoreError>;
}
