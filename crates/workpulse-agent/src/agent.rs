//! Agent orchestration with the tokio mpsc command/event pattern.
//!
//! The agent runs in a dedicated tokio task, independent of any page
//! lifetime. Push and click events arrive as typed commands and are handled
//! to completion, one at a time, before the next is taken off the channel;
//! awaiting the render/navigate calls inside the handler is what keeps the
//! event open until the asynchronous work finishes.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use workpulse_shared::constants::ACTION_DISMISS;
use workpulse_shared::payload::PushPayload;
use workpulse_shared::routing::route;
use workpulse_shared::types::NotificationData;

use crate::descriptor::build_descriptor;
use crate::error::AgentError;
use crate::lifecycle::AgentLifecycle;
use crate::platform::{NotificationSink, WindowRegistry};

/// Commands sent *into* the agent task.
#[derive(Debug)]
pub enum AgentCommand {
    /// A push message arrived; `payload` is the raw (possibly absent) body.
    Push { payload: Option<Vec<u8>> },
    /// The user interacted with a displayed notification.
    Click(NotificationClick),
    /// Gracefully shut down the agent.
    Shutdown,
}

/// Events reported *from* the agent task.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// A notification was rendered.
    Rendered { tag: String },
    /// A click was resolved to an in-app navigation.
    Navigated { path: String, opened_new: bool },
    /// The user dismissed a notification; no navigation happened.
    Dismissed { tag: String },
}

/// One user interaction with a displayed notification.
#[derive(Debug, Clone)]
pub struct NotificationClick {
    pub tag: String,
    /// Action button taken, if any; `None` is a click on the body.
    pub action: Option<String>,
    pub data: NotificationData,
}

/// Resolution of a click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The dismiss action was taken; nothing to navigate to.
    Dismissed,
    /// Navigation target resolved via the routing table.
    Navigated { path: String, opened_new: bool },
}

/// The background notification agent.
pub struct Agent<S, W> {
    lifecycle: AgentLifecycle,
    sink: S,
    windows: W,
}

impl<S: NotificationSink, W: WindowRegistry> Agent<S, W> {
    pub fn new(sink: S, windows: W) -> Self {
        Self {
            lifecycle: AgentLifecycle::new(),
            sink,
            windows,
        }
    }

    pub fn lifecycle(&self) -> &AgentLifecycle {
        &self.lifecycle
    }

    /// Install step: request immediate activation.
    pub fn install(&mut self) -> Result<(), AgentError> {
        self.lifecycle.complete_install()
    }

    /// Activate step: claim all existing windows of the origin so a push
    /// arriving immediately after first install is still handled.
    pub async fn activate(&mut self) -> Result<(), AgentError> {
        self.lifecycle.begin_activation()?;
        self.windows.claim().await;
        self.lifecycle.complete_activation()
    }

    /// Handle one push event. Returns the rendered tag, or `None` when the
    /// render call failed (the failure is logged and swallowed; a bad
    /// notification must never crash the agent or drop the event).
    pub async fn handle_push(&self, payload: Option<&[u8]>) -> Option<String> {
        let parsed = payload.and_then(PushPayload::parse);
        if parsed.is_none() {
            debug!(
                len = payload.map(<[u8]>::len).unwrap_or(0),
                "Push payload absent or not JSON, using default descriptor"
            );
        }

        let descriptor = build_descriptor(parsed, Utc::now());
        let tag = descriptor.tag.clone();

        match self.sink.show(&descriptor).await {
            Ok(()) => {
                info!(tag = %tag, title = %descriptor.title, "Notification rendered");
                Some(tag)
            }
            Err(e) => {
                warn!(tag = %tag, error = %e, "Notification render failed");
                None
            }
        }
    }

    /// Handle one notification click: close first (prevents re-triggering),
    /// stop on dismiss, otherwise navigate an existing window or open a new
    /// one at the routed target.
    pub async fn handle_click(
        &self,
        click: NotificationClick,
    ) -> Result<ClickOutcome, AgentError> {
        self.sink.close(&click.tag).await;

        if click.action.as_deref() == Some(ACTION_DISMISS) {
            debug!(tag = %click.tag, "Notification dismissed");
            return Ok(ClickOutcome::Dismissed);
        }

        let path = route(&click.data);
        let windows = self.windows.list().await;

        let opened_new = match windows.first() {
            Some(window) => {
                self.windows.focus_and_navigate(window, &path).await?;
                false
            }
            None => {
                self.windows.open(&path).await?;
                true
            }
        };

        info!(tag = %click.tag, path = %path, opened_new, "Click routed");
        Ok(ClickOutcome::Navigated { path, opened_new })
    }
}

/// Spawn the agent in a background tokio task.
///
/// Installs and activates the agent, then returns channels for sending
/// commands and receiving events.
pub async fn spawn_agent<S, W>(
    sink: S,
    windows: W,
) -> anyhow::Result<(mpsc::Sender<AgentCommand>, mpsc::Receiver<AgentEvent>)>
where
    S: NotificationSink + 'static,
    W: WindowRegistry + 'static,
{
    let mut agent = Agent::new(sink, windows);
    agent.install()?;
    agent.activate().await?;

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AgentCommand>(256);
    let (event_tx, event_rx) = mpsc::channel::<AgentEvent>(256);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AgentCommand::Push { payload } => {
                    if let Some(tag) = agent.handle_push(payload.as_deref()).await {
                        let _ = event_tx.send(AgentEvent::Rendered { tag }).await;
                    }
                }
                AgentCommand::Click(click) => {
                    let tag = click.tag.clone();
                    match agent.handle_click(click).await {
                        Ok(ClickOutcome::Dismissed) => {
                            let _ = event_tx.send(AgentEvent::Dismissed { tag }).await;
                        }
                        Ok(ClickOutcome::Navigated { path, opened_new }) => {
                            let _ = event_tx
                                .send(AgentEvent::Navigated { path, opened_new })
                                .await;
                        }
                        Err(e) => {
                            error!(tag = %tag, error = %e, "Click handling failed");
                        }
                    }
                }
                AgentCommand::Shutdown => {
                    info!("Agent shutdown requested");
                    break;
                }
            }
        }

        info!("Agent event loop terminated");
    });

    Ok((cmd_tx, event_rx))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use workpulse_shared::constants::{DEFAULT_BODY, DEFAULT_TITLE};
    use workpulse_shared::types::NotificationDescriptor;

    use super::*;
    use crate::platform::WindowHandle;

    #[derive(Default, Clone)]
    struct RecordingSink {
        shown: Arc<Mutex<Vec<NotificationDescriptor>>>,
        closed: Arc<Mutex<Vec<String>>>,
        fail_show: Arc<AtomicBool>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn show(&self, descriptor: &NotificationDescriptor) -> Result<(), AgentError> {
            if self.fail_show.load(Ordering::SeqCst) {
                return Err(AgentError::Render("platform refused".to_string()));
            }
            self.shown.lock().unwrap().push(descriptor.clone());
            Ok(())
        }

        async fn close(&self, tag: &str) {
            self.closed.lock().unwrap().push(tag.to_string());
        }
    }

    #[derive(Default, Clone)]
    struct RecordingWindows {
        claimed: Arc<AtomicBool>,
        windows: Arc<Mutex<Vec<WindowHandle>>>,
        navigations: Arc<Mutex<Vec<(WindowHandle, String)>>>,
        opened: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl WindowRegistry for RecordingWindows {
        async fn claim(&self) {
            self.claimed.store(true, Ordering::SeqCst);
        }

        async fn list(&self) -> Vec<WindowHandle> {
            self.windows.lock().unwrap().clone()
        }

        async fn focus_and_navigate(
            &self,
            window: &WindowHandle,
            path: &str,
        ) -> Result<(), AgentError> {
            self.navigations
                .lock()
                .unwrap()
                .push((window.clone(), path.to_string()));
            Ok(())
        }

        async fn open(&self, path: &str) -> Result<(), AgentError> {
            self.opened.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    async fn active_agent() -> Agent<RecordingSink, RecordingWindows> {
        let mut agent = Agent::new(RecordingSink::default(), RecordingWindows::default());
        agent.install().unwrap();
        agent.activate().await.unwrap();
        agent
    }

    #[tokio::test]
    async fn test_activation_claims_windows() {
        let agent = active_agent().await;
        assert!(agent.windows.claimed.load(Ordering::SeqCst));
        assert!(agent.lifecycle().is_active());
    }

    #[tokio::test]
    async fn test_malformed_payload_renders_exactly_one_default() {
        let agent = active_agent().await;

        let tag = agent.handle_push(Some(b"not json at all")).await;
        assert!(tag.is_some());

        let shown = agent.sink.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, DEFAULT_TITLE);
        assert_eq!(shown[0].body, DEFAULT_BODY);
        assert_eq!(shown[0].actions.len(), 2);
    }

    #[tokio::test]
    async fn test_absent_payload_renders_default() {
        let agent = active_agent().await;
        agent.handle_push(None).await;
        assert_eq!(agent.sink.shown.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_render_failure_is_swallowed() {
        let agent = active_agent().await;
        agent.sink.fail_show.store(true, Ordering::SeqCst);

        let tag = agent.handle_push(Some(b"{}")).await;
        assert!(tag.is_none());
        assert!(agent.sink.shown.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_closes_without_navigation() {
        let agent = active_agent().await;

        let outcome = agent
            .handle_click(NotificationClick {
                tag: "t-1".to_string(),
                action: Some(ACTION_DISMISS.to_string()),
                data: NotificationData::default(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Dismissed);
        assert_eq!(agent.sink.closed.lock().unwrap().as_slice(), ["t-1"]);
        assert!(agent.windows.navigations.lock().unwrap().is_empty());
        assert!(agent.windows.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_click_focuses_existing_window() {
        let agent = active_agent().await;
        agent
            .windows
            .windows
            .lock()
            .unwrap()
            .push(WindowHandle("w-1".to_string()));

        let outcome = agent
            .handle_click(NotificationClick {
                tag: "t-2".to_string(),
                action: Some("open".to_string()),
                data: NotificationData {
                    kind: Some("payment_received".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ClickOutcome::Navigated {
                path: "/stripe-connect".to_string(),
                opened_new: false,
            }
        );
        let navigations = agent.windows.navigations.lock().unwrap();
        assert_eq!(navigations.len(), 1);
        assert_eq!(navigations[0].1, "/stripe-connect");
        assert!(agent.windows.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_click_opens_new_window_when_none_exist() {
        let agent = active_agent().await;

        let outcome = agent
            .handle_click(NotificationClick {
                tag: "t-3".to_string(),
                action: None,
                data: NotificationData {
                    kind: Some("new_proposal".to_string()),
                    job_id: Some("J7".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ClickOutcome::Navigated {
                path: "/remote-jobs/J7/proposals".to_string(),
                opened_new: true,
            }
        );
        assert_eq!(
            agent.windows.opened.lock().unwrap().as_slice(),
            ["/remote-jobs/J7/proposals"]
        );
    }

    #[tokio::test]
    async fn test_spawned_agent_processes_commands() {
        let sink = RecordingSink::default();
        let windows = RecordingWindows::default();

        let (cmd_tx, mut event_rx) = spawn_agent(sink.clone(), windows).await.unwrap();

        cmd_tx
            .send(AgentCommand::Push {
                payload: Some(br#"{"title": "Hi", "tag": "p-1"}"#.to_vec()),
            })
            .await
            .unwrap();

        let event = event_rx.recv().await.unwrap();
        assert_eq!(
            event,
            AgentEvent::Rendered {
                tag: "p-1".to_string()
            }
        );
        assert_eq!(sink.shown.lock().unwrap()[0].title, "Hi");

        cmd_tx.send(AgentCommand::Shutdown).await.unwrap();
    }
}
