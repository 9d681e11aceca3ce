//! Platform push primitives behind a seam, so the manager is testable and
//! host-environment-independent.

use async_trait::async_trait;
use thiserror::Error;

use workpulse_shared::types::{ApplicationServerKey, PermissionState, SubscriptionRecord};

/// Errors surfaced by the platform's push primitives. Translated into the
/// typed subscribe/unsubscribe errors at the operation boundary, never
/// leaked raw to callers.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The registration primitive rejected the request (key mismatch,
    /// quota, transient network failure).
    #[error("Push registration rejected: {0}")]
    Rejected(String),

    /// The primitive is present but currently unavailable.
    #[error("Push platform unavailable: {0}")]
    Unavailable(String),
}

/// The platform's push-manager and background-agent primitives.
///
/// The platform owns the subscription record exclusively; the manager only
/// reads or replaces it wholesale. `subscribe` is idempotent: when an
/// active record already exists it is returned instead of creating a
/// duplicate.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Capability probe: true iff both the background-agent registration
    /// primitive and the push-manager primitive exist. Gates every other
    /// operation.
    fn is_supported(&self) -> bool;

    /// Current notification permission, without prompting.
    async fn permission(&self) -> PermissionState;

    /// Prompt the user for notification permission.
    async fn request_permission(&self) -> PermissionState;

    /// Register the background notification agent at `scope`.
    async fn register_agent(&self, scope: &str) -> Result<(), PlatformError>;

    /// The active subscription record, if one exists.
    async fn get_subscription(&self) -> Result<Option<SubscriptionRecord>, PlatformError>;

    /// Create (or return the existing) subscription. `user_visible_only`
    /// is always passed as true by this design: every push must surface a
    /// visible notification.
    async fn subscribe(
        &self,
        key: &ApplicationServerKey,
        user_visible_only: bool,
    ) -> Result<SubscriptionRecord, PlatformError>;

    /// Release the subscription identified by `endpoint`. Returns whether
    /// a subscription was actually removed.
    async fn unsubscribe(&self, endpoint: &str) -> Result<bool, PlatformError>;
}
