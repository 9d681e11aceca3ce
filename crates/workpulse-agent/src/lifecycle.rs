//! Agent lifecycle as an explicit state machine.
//!
//! Install requests immediate activation (the agent does not wait for open
//! pages to close) and activation claims all existing window contexts, so a
//! push arriving right after first install is still handled.

use tracing::info;

use crate::error::AgentError;

/// Lifecycle phase of the background notification agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    Installing,
    Installed,
    Activating,
    Active,
}

/// Tracks the agent's lifecycle and the two install-time commitments:
/// skipping the waiting phase and claiming existing windows.
#[derive(Debug)]
pub struct AgentLifecycle {
    phase: AgentPhase,
    skip_waiting_requested: bool,
    windows_claimed: bool,
}

impl AgentLifecycle {
    pub fn new() -> Self {
        Self {
            phase: AgentPhase::Installing,
            skip_waiting_requested: false,
            windows_claimed: false,
        }
    }

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == AgentPhase::Active
    }

    /// Whether immediate activation was requested during install.
    pub fn skip_waiting_requested(&self) -> bool {
        self.skip_waiting_requested
    }

    /// Whether existing windows were claimed during activation.
    pub fn windows_claimed(&self) -> bool {
        self.windows_claimed
    }

    /// `Installing -> Installed`, requesting immediate activation so
    /// notification delivery does not depend on a page refresh.
    pub fn complete_install(&mut self) -> Result<(), AgentError> {
        self.transition(AgentPhase::Installing, AgentPhase::Installed)?;
        self.skip_waiting_requested = true;
        info!("Agent installed, immediate activation requested");
        Ok(())
    }

    /// `Installed -> Activating`.
    pub fn begin_activation(&mut self) -> Result<(), AgentError> {
        self.transition(AgentPhase::Installed, AgentPhase::Activating)
    }

    /// `Activating -> Active`. Call after existing windows are claimed.
    pub fn complete_activation(&mut self) -> Result<(), AgentError> {
        self.transition(AgentPhase::Activating, AgentPhase::Active)?;
        self.windows_claimed = true;
        info!("Agent active, existing windows claimed");
        Ok(())
    }

    fn transition(&mut self, from: AgentPhase, to: AgentPhase) -> Result<(), AgentError> {
        if self.phase != from {
            return Err(AgentError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}

impl Default for AgentLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
