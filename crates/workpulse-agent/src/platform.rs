//! Platform seams the agent renders and navigates through.

use async_trait::async_trait;

use workpulse_shared::types::NotificationDescriptor;

use crate::error::AgentError;

/// Handle to one open window context of this origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle(pub String);

/// Renders system notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Display one notification. The agent awaits this to completion before
    /// the push event settles.
    async fn show(&self, descriptor: &NotificationDescriptor) -> Result<(), AgentError>;

    /// Close a displayed notification by tag.
    async fn close(&self, tag: &str);
}

/// Enumerates and controls window contexts of this origin.
#[async_trait]
pub trait WindowRegistry: Send + Sync {
    /// Take control of all existing windows, including ones opened before
    /// this agent instance was installed.
    async fn claim(&self);

    /// All currently open windows of this origin.
    async fn list(&self) -> Vec<WindowHandle>;

    /// Bring a window to the foreground and navigate it to `path`.
    async fn focus_and_navigate(
        &self,
        window: &WindowHandle,
        path: &str,
    ) -> Result<(), AgentError>;

    /// Open a new window at `path`.
    async fn open(&self, path: &str) -> Result<(), AgentError>;
}
