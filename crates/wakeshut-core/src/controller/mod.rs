//! View controllers
//!
//! State machines between user intent and the remote collaborators. Each
//! remote call runs on its own tokio task; the task's only link back to the
//! controller is the final state publication on a `watch` channel, which
//! also gives renderers push-on-change updates.
//!
//! Request methods must be called from within a tokio runtime.

mod action;
mod settings;

pub use action::MainController;
pub use settings::SettingsController;

/// Shown when shutdown is requested before host/username are configured
pub const MISSING_SSH_SETTINGS: &str = "Fill in the SSH settings first";

/// Shown when wake is requested before a MAC address is configured
pub const MISSING_WOL_SETTINGS: &str = "Fill in the Wake-on-LAN settings first";

#[cfg(test)]
pub(crate) mod testing {
    use crate::ports::{CommandRunner, WakeSender};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::Notify;
    use wakeshut_types::{ConnectionProfile, ExecutionOutcome};

    /// Runner returning a canned outcome, optionally held until released
    pub struct StubRunner {
        outcome: ExecutionOutcome,
        calls: AtomicUsize,
        commands: Mutex<Vec<(String, Duration)>>,
        gate: Option<Arc<Notify>>,
    }

    impl StubRunner {
        pub fn new(outcome: ExecutionOutcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
                commands: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        pub fn gated(outcome: ExecutionOutcome, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(outcome)
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn commands(&self) -> Vec<(String, Duration)> {
            self.commands.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for StubRunner {
        async fn execute(
            &self,
            _profile: &ConnectionProfile,
            command: &str,
            timeout: Duration,
        ) -> ExecutionOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.commands
                .lock()
                .unwrap()
                .push((command.to_string(), timeout));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcome.clone()
        }
    }

    /// Wake sender returning a fixed result and recording its arguments
    pub struct StubWaker {
        result: bool,
        calls: Mutex<Vec<(String, Option<String>, u16)>>,
    }

    impl StubWaker {
        pub fn new(result: bool) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, Option<String>, u16)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WakeSender for StubWaker {
        async fn send_wake(&self, mac: &str, broadcast: Option<&str>, port: u16) -> bool {
            self.calls
                .lock()
                .unwrap()
                .push((mac.to_string(), broadcast.map(str::to_string), port));
            self.result
        }
    }
}
