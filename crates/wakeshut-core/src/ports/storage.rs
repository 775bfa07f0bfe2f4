//! Settings persistence port

use crate::Result;
use wakeshut_types::{ConnectionProfile, WakeProfile};

/// Key-value settings store for the single managed machine.
///
/// Missing values load as the profile defaults. Each save writes all
/// fields of one profile together.
pub trait SettingsStore: Send + Sync {
    fn connection_profile(&self) -> Result<ConnectionProfile>;
    fn save_connection_profile(&self, profile: &ConnectionProfile) -> Result<()>;
    fn wake_profile(&self) -> Result<WakeProfile>;
    fn save_wake_profile(&self, profile: &WakeProfile) -> Result<()>;
}
