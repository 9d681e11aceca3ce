use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-facing notification permission, owned by the platform.
/// The lifecycle manager only reads or requests it, never sets it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// The user has not been asked yet.
    Unset,
    /// The user allowed notifications.
    Granted,
    /// The user blocked notifications. Not recoverable programmatically.
    Denied,
}

/// Encryption keys attached to a push subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionKeys {
    pub p256dh: Vec<u8>,
    pub auth: Vec<u8>,
}

/// One registered device/browser for push delivery.
///
/// Created by the platform's push registration primitive and mirrored to the
/// backend as the durable source of truth. At most one active record exists
/// per browser profile per origin; re-subscribing without unsubscribing
/// returns the existing record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionRecord {
    /// Delivery network endpoint URL for this device.
    pub endpoint: String,
    pub keys: SubscriptionKeys,
    /// Expiry of the subscription, if the delivery network imposes one.
    pub expiration_time: Option<DateTime<Utc>>,
}

/// Opaque VAPID public key bytes, fetched fresh per subscribe attempt.
///
/// Never cached across sessions: the backend may rotate the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationServerKey(pub Vec<u8>);

impl ApplicationServerKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One button on a rendered notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// Semantic data carried by a notification, used for click routing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationData {
    /// Semantic category, e.g. `new_proposal` or `contract_signed`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Explicit navigation target. Always wins over category dispatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,

    /// Unrecognized keys are retained so future categories round-trip.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Fully-defaulted description of one notification to render.
///
/// Ephemeral: built per push event, consumed by the rendering call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationDescriptor {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Unique per notification so concurrent pushes do not collapse.
    pub tag: String,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
}

/// Client-visible subscription status snapshot.
///
/// Derived from platform queries on demand, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionStatus {
    pub is_supported: bool,
    pub is_subscribed: bool,
    pub permission: PermissionState,
    pub loading: bool,
    pub error: Option<String>,
}
