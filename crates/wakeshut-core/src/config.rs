//! Runtime configuration
//!
//! Layered from an optional `config.toml` and `WAKESHUT_*` environment
//! variables. Credentials never live here; they belong to the encrypted
//! settings store.

use crate::ssh::HostKeyPolicy;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration file name inside the home directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WAKESHUT";

pub const DEFAULT_SHUTDOWN_COMMAND: &str = "sudo /sbin/shutdown -h now";
pub const DEFAULT_TEST_COMMAND: &str = "echo OK";
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_TEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Privileged command run by the shutdown action
    pub shutdown_command: String,
    pub shutdown_timeout_secs: u64,
    /// No-op command run by the connection test
    pub test_command: String,
    pub test_timeout_secs: u64,
    /// Pin the server host key; unset accepts any key
    pub host_key_fingerprint: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shutdown_command: DEFAULT_SHUTDOWN_COMMAND.to_string(),
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            test_command: DEFAULT_TEST_COMMAND.to_string(),
            test_timeout_secs: DEFAULT_TEST_TIMEOUT_SECS,
            host_key_fingerprint: None,
        }
    }
}

impl AppConfig {
    /// Load `path` (if it exists) overlaid with environment variables
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn test_timeout(&self) -> Duration {
        Duration::from_secs(self.test_timeout_secs)
    }

    pub fn host_key_policy(&self) -> HostKeyPolicy {
        HostKeyPolicy::from_fingerprint(self.host_key_fingerprint.clone())
    }
}
