// Background notification agent: origin-scoped listener that outlives any
// open page, renders push messages as system notifications, and routes
// clicks back into the application.

pub mod agent;
pub mod descriptor;
pub mod error;
pub mod lifecycle;
pub mod platform;

pub use agent::{spawn_agent, Agent, AgentCommand, AgentEvent, ClickOutcome, NotificationClick};
pub use descriptor::build_descriptor;
pub use error::AgentError;
pub use lifecycle::{AgentLifecycle, AgentPhase};
pub use platform::{NotificationSink, WindowHandle, WindowRegistry};
