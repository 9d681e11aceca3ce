//! Push payload wire format, as delivered by the push transport.
//!
//! Every field is optional; a payload that fails to parse is `None` and the
//! agent substitutes the full default descriptor. Parsing never fails a push
//! event.

use serde::{Deserialize, Serialize};

use crate::types::{NotificationAction, NotificationData};

/// JSON payload of one push message. All fields optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PushPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Legacy alias for `body`, still sent by older backend versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<NotificationData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<NotificationAction>>,
}

impl PushPayload {
    /// Parse raw push bytes. Returns `None` for an absent, empty, or
    /// non-JSON payload; the caller falls back to the default descriptor.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        serde_json::from_slice(bytes).ok()
    }

    /// Body text, accepting the legacy `message` key. `body` wins when both
    /// are present.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().or(self.message.as_deref())
    }
}
