/// Application name
pub const APP_NAME: &str = "WorkPulse";

/// Title shown when a push payload carries none
pub const DEFAULT_TITLE: &str = "WorkPulse Notification";

/// Body shown when a push payload carries none
pub const DEFAULT_BODY: &str = "You have a new notification";

/// Default notification icon path (origin-relative)
pub const DEFAULT_ICON: &str = "/icons/notification-192.png";

/// Default monochrome badge path (origin-relative)
pub const DEFAULT_BADGE: &str = "/icons/badge-72.png";

/// Namespace prefix for synthesized notification tags
pub const TAG_NAMESPACE: &str = "workpulse";

/// Action identifier for the default "open" notification button
pub const ACTION_OPEN: &str = "open";

/// Action identifier for the default "dismiss" notification button
pub const ACTION_DISMISS: &str = "dismiss";

/// Scope at which the background notification agent is registered
pub const AGENT_SCOPE: &str = "/";

/// Uncompressed P-256 public key length in bytes (VAPID application server key)
pub const SERVER_KEY_LEN: usize = 65;
