//! Port traits (interfaces) for dependency injection

pub mod remote;
pub mod storage;
pub mod wake;

pub use remote::CommandRunner;
pub use storage::SettingsStore;
pub use wake::WakeSender;
