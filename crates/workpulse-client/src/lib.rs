// Subscription lifecycle manager: drives the permission -> key fetch ->
// registration -> server sync handshake and exposes the current status to
// the host application.

pub mod api;
pub mod manager;
pub mod platform;

pub use api::{ApiError, ApiResponse, HttpPushApi, PushApi, SubscriptionUpload, UploadKeys, VapidKeyResponse};
pub use manager::{SubscriptionManager, SubscriptionPhase};
pub use platform::{PlatformError, PushPlatform};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the tracing subscriber for a host process.
///
/// Honours `RUST_LOG` when set, otherwise defaults to debug for the
/// WorkPulse crates and warn for everything else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("workpulse_client=debug,workpulse_agent=debug,workpulse_shared=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
