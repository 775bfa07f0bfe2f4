//! Wakeshut Core Library
//!
//! Remote execution (SSH command runner, Wake-on-LAN sender), the
//! encrypted settings store and the view controllers that front them.

// Re-export pure types from wakeshut-types
pub use wakeshut_types::*;

pub mod config;
pub mod controller;
#[cfg(feature = "crypto")]
pub mod crypto;
pub mod error;
pub mod ports;
pub mod ssh;
pub mod store;
pub mod wol;

pub use config::AppConfig;
pub use controller::{MainController, SettingsController};
#[cfg(feature = "crypto")]
pub use crypto::SecretBox;
pub use error::{Result, WakeshutError};
pub use ports::{CommandRunner, SettingsStore, WakeSender};
pub use ssh::{HostKeyPolicy, SshRunner};
#[cfg(feature = "crypto")]
pub use store::EncryptedFileStore;
pub use store::MemoryStore;
pub use wol::{send_wake, MagicPacket, UdpWakeSender};
