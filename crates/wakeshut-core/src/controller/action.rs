//! Main screen controller: shutdown and wake

use super::{MISSING_SSH_SETTINGS, MISSING_WOL_SETTINGS};
use crate::config::AppConfig;
use crate::ports::{CommandRunner, SettingsStore, WakeSender};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wakeshut_types::{ExecutionOutcome, ViewState};

/// Drives the shutdown and wake actions through a single [`ViewState`]
pub struct MainController {
    store: Arc<dyn SettingsStore>,
    runner: Arc<dyn CommandRunner>,
    waker: Arc<dyn WakeSender>,
    state: Arc<watch::Sender<ViewState>>,
    shutdown_command: String,
    shutdown_timeout: Duration,
}

impl MainController {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        runner: Arc<dyn CommandRunner>,
        waker: Arc<dyn WakeSender>,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        let defaults = AppConfig::default();
        Self {
            store,
            runner,
            waker,
            state: Arc::new(state),
            shutdown_timeout: defaults.shutdown_timeout(),
            shutdown_command: defaults.shutdown_command,
        }
    }

    /// Take the shutdown command and timeout from `config`
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.shutdown_command = config.shutdown_command.clone();
        self.shutdown_timeout = config.shutdown_timeout();
        self
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Send the shutdown command to the configured machine.
    ///
    /// Returns the background task, or `None` when nothing was started
    /// (validation failure, or another action still running).
    pub fn request_shutdown(&self) -> Option<JoinHandle<()>> {
        let profile = match self.store.connection_profile() {
            Ok(profile) => profile,
            Err(e) => {
                self.settle(ViewState::Failed(format!("Failed to load settings: {}", e)));
                return None;
            }
        };

        if !profile.is_complete() {
            self.settle(ViewState::Failed(MISSING_SSH_SETTINGS.to_string()));
            return None;
        }

        if !self.begin() {
            return None;
        }

        info!("Sending shutdown to {}", profile.target());
        let runner = self.runner.clone();
        let state = self.state.clone();
        let command = self.shutdown_command.clone();
        let timeout = self.shutdown_timeout;

        Some(tokio::spawn(async move {
            let next = match runner.execute(&profile, &command, timeout).await {
                ExecutionOutcome::Success { output } => {
                    ViewState::Succeeded(format!("Command sent. Output: {}", output))
                }
                ExecutionOutcome::Failure { message } => ViewState::Failed(message),
            };
            debug!("Shutdown finished: {}", next);
            state.send_replace(next);
        }))
    }

    /// Broadcast a magic packet for the configured MAC address
    pub fn request_wake(&self) -> Option<JoinHandle<()>> {
        let profile = match self.store.wake_profile() {
            Ok(profile) => profile,
            Err(e) => {
                self.settle(ViewState::Failed(format!("Failed to load settings: {}", e)));
                return None;
            }
        };

        if !profile.is_complete() {
            self.settle(ViewState::Failed(MISSING_WOL_SETTINGS.to_string()));
            return None;
        }

        if !self.begin() {
            return None;
        }

        info!(
            "Waking {} via {}:{}",
            profile.mac_address,
            profile.resolved_broadcast(),
            profile.port
        );
        let waker = self.waker.clone();
        let state = self.state.clone();

        Some(tokio::spawn(async move {
            let mac = profile.mac_address.trim();
            let sent = waker.send_wake(mac, profile.broadcast(), profile.port).await;
            let next = if sent {
                ViewState::Succeeded(format!("Magic packet sent to {}", mac))
            } else {
                ViewState::Failed(format!("Failed to send magic packet to {}", mac))
            };
            state.send_replace(next);
        }))
    }

    /// Dismiss a finished result. No-op unless Succeeded or Failed.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|state| {
            if state.is_terminal() {
                *state = ViewState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Move to Running unless an action is already in flight
    fn begin(&self) -> bool {
        let started = self.settle(ViewState::Running);
        if !started {
            warn!("Action already running; request ignored");
        }
        started
    }

    /// Publish `next` unless an action is in flight
    fn settle(&self, next: ViewState) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_running() {
                false
            } else {
                *state = next;
                true
            }
        })
    }
}
