//! Subscription lifecycle manager.
//!
//! Drives the subscribe/unsubscribe handshake against the platform and the
//! backend, and exposes a derived status snapshot. Status is recomputed
//! from platform queries; nothing is persisted client-side.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use workpulse_shared::constants::AGENT_SCOPE;
use workpulse_shared::error::{SubscribeError, UnsubscribeError};
use workpulse_shared::keys::{decode_server_key, encode_key_param};
use workpulse_shared::types::{PermissionState, SubscriptionStatus};

use crate::api::{PushApi, SubscriptionUpload, UploadKeys};
use crate::platform::PushPlatform;

/// Manager state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionPhase {
    /// Capability not probed yet.
    Unknown,
    /// Platform lacks the required primitives; every operation refuses.
    Unsupported,
    NotSubscribed,
    Subscribing,
    Subscribed,
    Unsubscribing,
}

#[derive(Debug)]
struct ManagerState {
    phase: SubscriptionPhase,
    loading: bool,
    error: Option<String>,
    is_subscribed: bool,
}

/// Per-page controller for the push subscription lifecycle.
///
/// Operations are not re-entrant: a second `subscribe`/`unsubscribe` while
/// one is in flight is rejected with `OperationInFlight` instead of issuing
/// a second permission prompt. Status reads are side-effect-free and may
/// run concurrently with anything.
pub struct SubscriptionManager<P, A> {
    platform: P,
    api: A,
    auth_token: Mutex<Option<String>>,
    state: Mutex<ManagerState>,
    /// Held for the duration of one subscribe/unsubscribe; `try_lock`
    /// failure is the re-entrancy rejection.
    op_lock: Mutex<()>,
}

impl<P: PushPlatform, A: PushApi> SubscriptionManager<P, A> {
    pub fn new(platform: P, api: A) -> Self {
        Self {
            platform,
            api,
            auth_token: Mutex::new(None),
            state: Mutex::new(ManagerState {
                phase: SubscriptionPhase::Unknown,
                loading: false,
                error: None,
                is_subscribed: false,
            }),
            op_lock: Mutex::new(()),
        }
    }

    /// Host hook: platform capability may have changed (first use included).
    pub async fn on_capability_change(&self) {
        self.sync_registration().await;
    }

    /// Host hook: the authenticated session changed.
    pub async fn on_auth_change(&self, token: Option<String>) {
        *self.auth_token.lock().await = token;
        self.sync_registration().await;
    }

    /// Current derived status snapshot.
    pub async fn status(&self) -> SubscriptionStatus {
        let is_supported = self.platform.is_supported();
        let permission = if is_supported {
            self.platform.permission().await
        } else {
            PermissionState::Unset
        };

        let st = self.state.lock().await;
        SubscriptionStatus {
            is_supported,
            is_subscribed: st.is_subscribed,
            permission,
            loading: st.loading,
            error: st.error.clone(),
        }
    }

    pub async fn phase(&self) -> SubscriptionPhase {
        self.state.lock().await.phase
    }

    /// Register the agent and reconcile `is_subscribed` with the platform.
    ///
    /// Runs once capability and an authenticated session are both present;
    /// reconciling from `get_subscription` restores state after a page
    /// reload without re-prompting the user.
    async fn sync_registration(&self) {
        if !self.platform.is_supported() {
            let mut st = self.state.lock().await;
            st.phase = SubscriptionPhase::Unsupported;
            return;
        }

        if self.auth_token.lock().await.is_none() {
            return;
        }

        if let Err(e) = self.platform.register_agent(AGENT_SCOPE).await {
            warn!(error = %e, "Agent registration failed");
            let mut st = self.state.lock().await;
            st.error = Some("Could not initialize notifications".to_string());
            return;
        }

        match self.platform.get_subscription().await {
            Ok(existing) => {
                let is_subscribed = existing.is_some();
                let mut st = self.state.lock().await;
                st.is_subscribed = is_subscribed;
                st.phase = if is_subscribed {
                    SubscriptionPhase::Subscribed
                } else {
                    SubscriptionPhase::NotSubscribed
                };
                info!(is_subscribed, "Subscription status reconciled");
            }
            Err(e) => {
                warn!(error = %e, "Existing-subscription check failed");
            }
        }
    }

    /// Run the full subscribe handshake: permission, key fetch, platform
    /// registration, backend sync.
    pub async fn subscribe(&self) -> Result<(), SubscribeError> {
        // The rejected caller does not touch loading/error; those belong
        // to the operation already in flight.
        let Ok(_guard) = self.op_lock.try_lock() else {
            return Err(SubscribeError::OperationInFlight);
        };

        {
            let mut st = self.state.lock().await;
            st.phase = SubscriptionPhase::Subscribing;
            st.loading = true;
            st.error = None;
        }

        let result = self.subscribe_inner().await;

        // Guaranteed cleanup regardless of which stage failed.
        let mut st = self.state.lock().await;
        st.loading = false;
        match &result {
            Ok(()) => {
                st.is_subscribed = true;
                st.phase = SubscriptionPhase::Subscribed;
                st.error = None;
            }
            Err(e) => {
                st.error = Some(e.user_message());
                st.phase = if st.is_subscribed {
                    SubscriptionPhase::Subscribed
                } else {
                    SubscriptionPhase::NotSubscribed
                };
            }
        }

        result
    }

    async fn subscribe_inner(&self) -> Result<(), SubscribeError> {
        if !self.platform.is_supported() {
            return Err(SubscribeError::NotSupported);
        }
        let token = self
            .auth_token
            .lock()
            .await
            .clone()
            .ok_or(SubscribeError::Unauthenticated)?;

        let permission = self.platform.request_permission().await;
        if permission != PermissionState::Granted {
            debug!(?permission, "Permission not granted, aborting subscribe");
            return Err(SubscribeError::PermissionDenied);
        }

        let key_resp = self
            .api
            .fetch_vapid_key()
            .await
            .map_err(|e| SubscribeError::RegistrationFailed(e.to_string()))?;
        let key_str = match (key_resp.success, key_resp.vapid_public_key) {
            (true, Some(key)) => key,
            _ => return Err(SubscribeError::ServerNotConfigured),
        };

        let key = decode_server_key(&key_str)
            .map_err(|e| SubscribeError::RegistrationFailed(e.to_string()))?;

        // Silent pushes are disallowed by this design: every push must
        // surface a visible notification.
        let record = self
            .platform
            .subscribe(&key, true)
            .await
            .map_err(|e| SubscribeError::RegistrationFailed(e.to_string()))?;

        info!(endpoint = %record.endpoint, "Platform subscription created");

        let upload = SubscriptionUpload {
            endpoint: record.endpoint.clone(),
            keys: UploadKeys {
                p256dh: encode_key_param(&record.keys.p256dh),
                auth: encode_key_param(&record.keys.auth),
            },
            expiration_time: record.expiration_time,
        };

        // The local platform subscription is not rolled back on sync
        // failure; the caller may retry without re-prompting permission.
        match self.api.register_subscription(&token, &upload).await {
            Ok(resp) if resp.success => {
                info!("Subscription synced with server");
                Ok(())
            }
            Ok(resp) => Err(SubscribeError::ServerSyncFailed(
                resp.detail.unwrap_or_else(|| "request rejected".to_string()),
            )),
            Err(e) => Err(SubscribeError::ServerSyncFailed(e.to_string())),
        }
    }

    /// Release the subscription. A missing record is a successful no-op;
    /// the backend delete is best-effort and never blocks local state.
    pub async fn unsubscribe(&self) -> Result<(), UnsubscribeError> {
        let Ok(_guard) = self.op_lock.try_lock() else {
            return Err(UnsubscribeError::OperationInFlight);
        };

        {
            let mut st = self.state.lock().await;
            st.phase = SubscriptionPhase::Unsubscribing;
            st.loading = true;
            st.error = None;
        }

        let result = self.unsubscribe_inner().await;

        let mut st = self.state.lock().await;
        st.loading = false;
        match &result {
            Ok(()) => {
                st.is_subscribed = false;
                st.phase = SubscriptionPhase::NotSubscribed;
                st.error = None;
            }
            Err(e) => {
                st.error = Some(e.user_message());
                st.phase = if st.is_subscribed {
                    SubscriptionPhase::Subscribed
                } else {
                    SubscriptionPhase::NotSubscribed
                };
            }
        }

        result
    }

    async fn unsubscribe_inner(&self) -> Result<(), UnsubscribeError> {
        if !self.platform.is_supported() {
            return Err(UnsubscribeError::NotSupported);
        }

        let existing = self
            .platform
            .get_subscription()
            .await
            .map_err(|e| UnsubscribeError::PlatformFailed(e.to_string()))?;

        let Some(record) = existing else {
            debug!("No active subscription, unsubscribe is a no-op");
            return Ok(());
        };

        self.platform
            .unsubscribe(&record.endpoint)
            .await
            .map_err(|e| UnsubscribeError::PlatformFailed(e.to_string()))?;

        info!(endpoint = %record.endpoint, "Platform subscription released");

        let token = self.auth_token.lock().await.clone();
        if let Some(token) = token {
            if let Err(e) = self.api.delete_subscription(&token, &record.endpoint).await {
                warn!(error = %e, "Best-effort server delete failed");
            }
        }

        Ok(())
    }
}
