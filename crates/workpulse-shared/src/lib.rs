// Shared leaf types and pure functions for the WorkPulse push core.

pub mod constants;
pub mod error;
pub mod keys;
pub mod payload;
pub mod routing;
pub mod types;

pub use error::{KeyCodecError, SubscribeError, UnsubscribeError};
pub use keys::{decode_server_key, encode_key_param};
pub use payload::PushPayload;
pub use routing::route;
pub use types::{
    ApplicationServerKey, NotificationAction, NotificationData, NotificationDescriptor,
    PermissionState, SubscriptionKeys, SubscriptionRecord, SubscriptionStatus,
};
