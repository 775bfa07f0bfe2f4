//! Remote command execution port

use async_trait::async_trait;
use std::time::Duration;
use wakeshut_types::{ConnectionProfile, ExecutionOutcome};

/// Runs a single command on the machine described by a profile
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute `command` and report the outcome.
    ///
    /// Never fails: connection, authentication and remote errors are all
    /// folded into [`ExecutionOutcome::Failure`]. Callers check
    /// [`ConnectionProfile::is_complete`] first.
    async fn execute(
        &self,
        profile: &ConnectionProfile,
        command: &str,
        timeout: Duration,
    ) -> ExecutionOutcome;
}
