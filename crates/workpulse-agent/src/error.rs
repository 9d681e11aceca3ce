use thiserror::Error;

use crate::lifecycle::AgentPhase;

/// Errors produced by the background notification agent.
#[derive(Error, Debug)]
pub enum AgentError {
    /// A lifecycle transition was requested out of order.
    #[error("Invalid lifecycle transition: {from:?} -> {to:?}")]
    InvalidTransition { from: AgentPhase, to: AgentPhase },

    /// The platform failed to render a notification. Swallowed at the push
    /// event boundary; one bad notification must not crash the agent.
    #[error("Notification render failed: {0}")]
    Render(String),

    /// A window could not be focused, navigated, or opened.
    #[error("Window operation failed: {0}")]
    Window(String),
}
