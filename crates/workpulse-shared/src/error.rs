use thiserror::Error;

/// Failure modes of the subscribe operation, in the order the steps run.
#[derive(Error, Debug)]
pub enum SubscribeError {
    /// The platform lacks the background-agent or push-manager primitive.
    /// Fatal, no retry.
    #[error("Push notifications are not supported on this platform")]
    NotSupported,

    /// No authenticated session is present.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The user declined the permission prompt (or had already blocked it).
    /// Recoverable only by the user via platform settings.
    #[error("Notification permission was denied")]
    PermissionDenied,

    /// The backend has no VAPID key configured. Operator error.
    #[error("Push notifications are not configured on the server")]
    ServerNotConfigured,

    /// The platform's subscribe primitive failed (key mismatch, quota,
    /// network). Retryable by re-invoking subscribe.
    #[error("Push registration failed: {0}")]
    RegistrationFailed(String),

    /// The backend rejected or failed to store the subscription record.
    /// The local platform subscription stays intact; retryable without
    /// re-prompting permission.
    #[error("Failed to sync subscription with the server: {0}")]
    ServerSyncFailed(String),

    /// Another subscribe/unsubscribe is already in flight.
    #[error("A subscription operation is already in progress")]
    OperationInFlight,
}

impl SubscribeError {
    /// Human-readable message suitable for direct display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSupported => {
                "Push notifications are not supported in this browser".to_string()
            }
            Self::Unauthenticated => "Please sign in to enable notifications".to_string(),
            Self::PermissionDenied => {
                "Notification permission was denied. You can re-enable it in your \
                 browser settings"
                    .to_string()
            }
            Self::ServerNotConfigured => {
                "Notifications are temporarily unavailable. Please try again later".to_string()
            }
            Self::RegistrationFailed(_) => {
                "Could not register for push notifications. Please try again".to_string()
            }
            Self::ServerSyncFailed(_) => {
                "Subscribed locally, but syncing with the server failed. Please retry".to_string()
            }
            Self::OperationInFlight => {
                "A notification setup is already in progress".to_string()
            }
        }
    }
}

/// Failure modes of the unsubscribe operation.
#[derive(Error, Debug)]
pub enum UnsubscribeError {
    /// The platform lacks the required primitives.
    #[error("Push notifications are not supported on this platform")]
    NotSupported,

    /// The platform refused to release the subscription.
    #[error("Failed to unregister push subscription: {0}")]
    PlatformFailed(String),

    /// Another subscribe/unsubscribe is already in flight.
    #[error("A subscription operation is already in progress")]
    OperationInFlight,
}

impl UnsubscribeError {
    /// Human-readable message suitable for direct display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSupported => {
                "Push notifications are not supported in this browser".to_string()
            }
            Self::PlatformFailed(_) => {
                "Could not disable push notifications. Please try again".to_string()
            }
            Self::OperationInFlight => {
                "A notification setup is already in progress".to_string()
            }
        }
    }
}

/// Errors from decoding a server-supplied application server key.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyCodecError {
    /// Input length is impossible for base64 (length 1 mod 4).
    #[error("Invalid key length")]
    InvalidLength,

    /// Input contains characters outside the base64url alphabet, or
    /// non-canonical trailing bits.
    #[error("Base64 decode error")]
    Base64Decode,
}
