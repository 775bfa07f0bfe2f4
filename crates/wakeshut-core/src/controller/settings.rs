//! Settings screen controller: drafts, saving, connection test

use crate::config::AppConfig;
use crate::ports::{CommandRunner, SettingsStore, WakeSender};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use wakeshut_types::{ConnectionProfile, ExecutionOutcome, SettingsOpState, TestState, WakeProfile};

/// Holds editable drafts of both profiles with two independent state axes:
/// the last save and the last connection test.
pub struct SettingsController {
    store: Arc<dyn SettingsStore>,
    runner: Arc<dyn CommandRunner>,
    waker: Arc<dyn WakeSender>,
    connection: watch::Sender<ConnectionProfile>,
    wake: watch::Sender<WakeProfile>,
    save_state: watch::Sender<SettingsOpState>,
    test_state: Arc<watch::Sender<TestState>>,
    test_command: String,
}

impl SettingsController {
    /// Create the controller with drafts loaded from `store`
    pub fn new(
        store: Arc<dyn SettingsStore>,
        runner: Arc<dyn CommandRunner>,
        waker: Arc<dyn WakeSender>,
    ) -> Self {
        let controller = Self {
            store,
            runner,
            waker,
            connection: watch::channel(ConnectionProfile::default()).0,
            wake: watch::channel(WakeProfile::default()).0,
            save_state: watch::channel(SettingsOpState::Idle).0,
            test_state: Arc::new(watch::channel(TestState::NotTested).0),
            test_command: AppConfig::default().test_command,
        };
        controller.load();
        controller
    }

    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.test_command = config.test_command.clone();
        self
    }

    /// Replace the drafts with what the store holds. A profile that cannot
    /// be read keeps its current draft.
    pub fn load(&self) {
        let mut first_error = None;

        match self.store.connection_profile() {
            Ok(profile) => {
                self.connection.send_replace(profile);
            }
            Err(e) => first_error = Some(e),
        }
        match self.store.wake_profile() {
            Ok(profile) => {
                self.wake.send_replace(profile);
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }

        if let Some(e) = first_error {
            warn!("Failed to load settings: {}", e);
            self.save_state
                .send_replace(SettingsOpState::Failed(format!("Failed to load settings: {}", e)));
        }
    }

    pub fn connection_profile(&self) -> ConnectionProfile {
        self.connection.borrow().clone()
    }

    pub fn wake_profile(&self) -> WakeProfile {
        self.wake.borrow().clone()
    }

    pub fn subscribe_connection_profile(&self) -> watch::Receiver<ConnectionProfile> {
        self.connection.subscribe()
    }

    pub fn subscribe_wake_profile(&self) -> watch::Receiver<WakeProfile> {
        self.wake.subscribe()
    }

    pub fn update_connection_profile(&self, profile: ConnectionProfile) {
        self.connection.send_replace(profile);
    }

    pub fn update_wake_profile(&self, profile: WakeProfile) {
        self.wake.send_replace(profile);
    }

    pub fn save_state(&self) -> SettingsOpState {
        self.save_state.borrow().clone()
    }

    pub fn subscribe_save_state(&self) -> watch::Receiver<SettingsOpState> {
        self.save_state.subscribe()
    }

    pub fn test_state(&self) -> TestState {
        self.test_state.borrow().clone()
    }

    pub fn subscribe_test_state(&self) -> watch::Receiver<TestState> {
        self.test_state.subscribe()
    }

    /// Persist the SSH draft; returns the resulting save state
    pub fn save_connection_profile(&self) -> SettingsOpState {
        self.save_state.send_replace(SettingsOpState::Saving);
        let profile = self.connection_profile();
        let result = self.store.save_connection_profile(&profile);
        self.finish_save(result, "Settings saved")
    }

    /// Persist the Wake-on-LAN draft; returns the resulting save state
    pub fn save_wake_profile(&self) -> SettingsOpState {
        self.save_state.send_replace(SettingsOpState::Saving);
        let profile = self.wake_profile();
        let result = self.store.save_wake_profile(&profile);
        self.finish_save(result, "Wake-on-LAN settings saved")
    }

    fn finish_save(&self, result: crate::Result<()>, saved: &str) -> SettingsOpState {
        let next = match result {
            Ok(()) => {
                info!("{}", saved);
                SettingsOpState::Saved(saved.to_string())
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                SettingsOpState::Failed(format!("Failed to save settings: {}", e))
            }
        };
        self.save_state.send_replace(next.clone());
        next
    }

    /// Run the no-op test command against the unsaved SSH draft.
    ///
    /// Returns `None` when the draft is incomplete or a test is already
    /// running.
    pub fn test_connection(&self, timeout: Duration) -> Option<JoinHandle<()>> {
        let profile = self.connection_profile();

        if !profile.is_complete() {
            self.settle_test(TestState::Failed("Error: Fill in host and username first".to_string()));
            return None;
        }

        if !self.settle_test(TestState::Testing) {
            warn!("Connection test already running; request ignored");
            return None;
        }

        info!("Testing connection to {}", profile.target());
        let runner = self.runner.clone();
        let state = self.test_state.clone();
        let command = self.test_command.clone();

        Some(tokio::spawn(async move {
            let next = match runner.execute(&profile, &command, timeout).await {
                ExecutionOutcome::Success { output } => {
                    TestState::Succeeded(format!("Success: {}", output))
                }
                ExecutionOutcome::Failure { message } => {
                    TestState::Failed(format!("Error: {}", message))
                }
            };
            state.send_replace(next);
        }))
    }

    /// Send a magic packet using the unsaved Wake-on-LAN draft
    pub async fn send_test_wake(&self) -> bool {
        let profile = self.wake_profile();
        self.waker
            .send_wake(profile.mac_address.trim(), profile.broadcast(), profile.port)
            .await
    }

    /// Publish `next` unless a test is in flight
    fn settle_test(&self, next: TestState) -> bool {
        self.test_state.send_if_modified(|state| {
            if state.is_testing() {
                false
            } else {
                *state = next;
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{StubRunner, StubWaker};
    use crate::store::MemoryStore;
    use crate::{Result, WakeshutError};
    use tokio::sync::Notify;

    /// Readable SSH settings, unreadable Wake-on-LAN settings, no saves
    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn connection_profile(&self) -> Result<ConnectionProfile> {
            Ok(ConnectionProfile::with_password("pc.lan", "me", "pw"))
        }

        fn save_connection_profile(&self, _profile: &ConnectionProfile) -> Result<()> {
            Err(WakeshutError::Storage("disk full".to_string()))
        }

        fn wake_profile(&self) -> Result<WakeProfile> {
            Err(WakeshutError::Decryption("bad key".to_string()))
        }

        fn save_wake_profile(&self, _profile: &WakeProfile) -> Result<()> {
            Err(WakeshutError::Storage("disk full".to_string()))
        }
    }

    fn controller_with(
        store: Arc<dyn SettingsStore>,
        runner: Arc<StubRunner>,
        waker: Arc<StubWaker>,
    ) -> SettingsController {
        SettingsController::new(store, runner, waker)
    }

    #[tokio::test]
    async fn test_new_loads_drafts_from_store() {
        let conn = ConnectionProfile::with_password("pc.lan", "me", "pw");
        let wake = WakeProfile::new("AABBCCDDEEFF");
        let ctrl = controller_with(
            Arc::new(MemoryStore::with_profiles(&conn, &wake)),
            Arc::new(StubRunner::new(ExecutionOutcome::success("OK"))),
            Arc::new(StubWaker::new(true)),
        );

        assert_eq!(ctrl.connection_profile(), conn);
        assert_eq!(ctrl.wake_profile(), wake);
        assert_eq!(ctrl.save_state(), SettingsOpState::Idle);
        assert_eq!(ctrl.test_state(), TestState::NotTested);
    }

    #[tokio::test]
    async fn test_save_then_reload() {
        let store = Arc::new(MemoryStore::new());
        let ctrl = controller_with(
            store.clone(),
            Arc::new(StubRunner::new(ExecutionOutcome::success("OK"))),
            Arc::new(StubWaker::new(true)),
        );

        let conn = ConnectionProfile::with_private_key("10.0.0.2", "root", "PEM");
        ctrl.update_connection_profile(conn.clone());
        assert_eq!(
            ctrl.save_connection_profile(),
            SettingsOpState::Saved("Settings saved".to_string())
        );

        let wake = WakeProfile::new("AA-BB-CC-DD-EE-FF");
        ctrl.update_wake_profile(wake.clone());
        assert_eq!(
            ctrl.save_wake_profile(),
            SettingsOpState::Saved("Wake-on-LAN settings saved".to_string())
        );

        ctrl.update_connection_profile(ConnectionProfile::default());
        ctrl.load();
        assert_eq!(ctrl.connection_profile(), conn);
        assert_eq!(store.wake_profile().unwrap(), wake);
    }

    #[tokio::test]
    async fn test_store_failures_surface_in_save_state() {
        let ctrl = controller_with(
            Arc::new(BrokenStore),
            Arc::new(StubRunner::new(ExecutionOutcome::success("OK"))),
            Arc::new(StubWaker::new(true)),
        );
        assert!(matches!(
            ctrl.save_state(),
            SettingsOpState::Failed(msg) if msg.starts_with("Failed to load settings")
        ));
        // The readable profile is still applied
        assert_eq!(
            ctrl.connection_profile(),
            ConnectionProfile::with_password("pc.lan", "me", "pw")
        );
        assert_eq!(ctrl.wake_profile(), WakeProfile::default());

        let state = ctrl.save_connection_profile();
        assert_eq!(
            state,
            SettingsOpState::Failed("Failed to save settings: Storage error: disk full".to_string())
        );
        assert_eq!(ctrl.save_state(), state);
    }

    #[tokio::test]
    async fn test_connection_test_uses_draft() {
        let runner = Arc::new(StubRunner::new(ExecutionOutcome::success("OK")));
        let ctrl = controller_with(
            Arc::new(MemoryStore::new()),
            runner.clone(),
            Arc::new(StubWaker::new(true)),
        );

        assert!(ctrl.test_connection(Duration::from_secs(10)).is_none());
        assert_eq!(
            ctrl.test_state(),
            TestState::Failed("Error: Fill in host and username first".to_string())
        );
        assert_eq!(runner.calls(), 0);

        ctrl.update_connection_profile(ConnectionProfile::with_password("pc", "me", "pw"));
        let task = ctrl.test_connection(Duration::from_secs(10)).unwrap();
        task.await.unwrap();

        assert_eq!(ctrl.test_state(), TestState::Succeeded("Success: OK".to_string()));
        assert_eq!(
            runner.commands(),
            vec![("echo OK".to_string(), Duration::from_secs(10))]
        );
        // Testing never touches the save axis
        assert_eq!(ctrl.save_state(), SettingsOpState::Idle);
    }

    #[tokio::test]
    async fn test_connection_test_failure() {
        let ctrl = controller_with(
            Arc::new(MemoryStore::new()),
            Arc::new(StubRunner::new(ExecutionOutcome::failure("Authentication failed: rejected"))),
            Arc::new(StubWaker::new(true)),
        );
        ctrl.update_connection_profile(ConnectionProfile::with_password("pc", "me", "bad"));

        ctrl.test_connection(Duration::from_secs(1)).unwrap().await.unwrap();
        assert_eq!(
            ctrl.test_state(),
            TestState::Failed("Error: Authentication failed: rejected".to_string())
        );
    }

    #[tokio::test]
    async fn test_second_test_rejected_while_testing() {
        let gate = Arc::new(Notify::new());
        let runner = Arc::new(StubRunner::gated(ExecutionOutcome::success("OK"), gate.clone()));
        let ctrl = controller_with(
            Arc::new(MemoryStore::new()),
            runner.clone(),
            Arc::new(StubWaker::new(true)),
        );
        ctrl.update_connection_profile(ConnectionProfile::with_password("pc", "me", "pw"));

        let task = ctrl.test_connection(Duration::from_secs(10)).unwrap();
        assert!(ctrl.test_connection(Duration::from_secs(10)).is_none());

        // Saving stays available during a test
        assert!(matches!(ctrl.save_connection_profile(), SettingsOpState::Saved(_)));
        assert_eq!(ctrl.test_state(), TestState::Testing);

        gate.notify_one();
        task.await.unwrap();
        assert_eq!(runner.calls(), 1);
    }

    #[test]
    fn test_send_test_wake_uses_unsaved_draft() {
        let store = Arc::new(MemoryStore::new());
        let waker = Arc::new(StubWaker::new(true));
        let ctrl = controller_with(
            store.clone(),
            Arc::new(StubRunner::new(ExecutionOutcome::success("OK"))),
            waker.clone(),
        );

        let mut wake = WakeProfile::new(" AA:BB:CC:DD:EE:FF ");
        wake.port = 7;
        ctrl.update_wake_profile(wake);

        assert!(tokio_test::block_on(ctrl.send_test_wake()));
        assert_eq!(waker.calls(), vec![("AA:BB:CC:DD:EE:FF".to_string(), None, 7)]);
        assert_eq!(store.wake_profile().unwrap(), WakeProfile::default());
        assert_eq!(ctrl.save_state(), SettingsOpState::Idle);
        assert_eq!(ctrl.test_state(), TestState::NotTested);
    }
}
