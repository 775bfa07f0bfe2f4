//! Connection and Wake-on-LAN profiles

use serde::{Deserialize, Serialize};

/// Default SSH port
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Default Wake-on-LAN UDP port (discard service)
pub const DEFAULT_WOL_PORT: u16 = 9;

/// Limited broadcast address used when no broadcast address is configured
pub const LIMITED_BROADCAST: &str = "255.255.255.255";

/// SSH credentials and target for the managed machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub host: String,
    pub port: u16,
    pub username: String,
    /// Selects which of `password` / `private_key_pem` is used
    pub use_password: bool,
    pub password: String,
    pub private_key_pem: String,
}

/// The credential selected by `use_password`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    Password(&'a str),
    PrivateKey(&'a str),
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SSH_PORT,
            username: String::new(),
            use_password: true,
            password: String::new(),
            private_key_pem: String::new(),
        }
    }
}

impl ConnectionProfile {
    pub fn with_password(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_private_key(
        host: impl Into<String>,
        username: impl Into<String>,
        private_key_pem: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            use_password: false,
            private_key_pem: private_key_pem.into(),
            ..Self::default()
        }
    }

    /// Host and username are both required before any connection attempt
    pub fn is_complete(&self) -> bool {
        !self.host.trim().is_empty() && !self.username.trim().is_empty()
    }

    /// The credential that is semantically active for this profile
    pub fn credential(&self) -> Credential<'_> {
        if self.use_password {
            Credential::Password(&self.password)
        } else {
            Credential::PrivateKey(&self.private_key_pem)
        }
    }

    /// `user@host:port`, never includes secrets
    pub fn target(&self) -> String {
        format!("{}@{}:{}", self.username, self.host, self.port)
    }
}

/// Wake-on-LAN parameters for the managed machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeProfile {
    /// 12 hex digits, optionally colon or dash separated
    pub mac_address: String,
    /// Blank means the limited broadcast address
    pub broadcast_address: String,
    pub port: u16,
}

impl Default for WakeProfile {
    fn default() -> Self {
        Self {
            mac_address: String::new(),
            broadcast_address: String::new(),
            port: DEFAULT_WOL_PORT,
        }
    }
}

impl WakeProfile {
    pub fn new(mac_address: impl Into<String>) -> Self {
        Self {
            mac_address: mac_address.into(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.mac_address.trim().is_empty()
    }

    /// Configured broadcast address, `None` when blank
    pub fn broadcast(&self) -> Option<&str> {
        let addr = self.broadcast_address.trim();
        if addr.is_empty() {
            None
        } else {
            Some(addr)
        }
    }

    /// Address the magic packet will actually be sent to
    pub fn resolved_broadcast(&self) -> &str {
        self.broadcast().unwrap_or(LIMITED_BROADCAST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_defaults() {
        let profile = ConnectionProfile::default();
        assert_eq!(profile.port, 22);
        assert!(profile.use_password);
        assert!(profile.host.is_empty());
        assert!(profile.username.is_empty());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_credential_follows_use_password() {
        let mut profile = ConnectionProfile::with_password("pc", "root", "secret");
        profile.private_key_pem = "KEY".to_string();
        assert_eq!(profile.credential(), Credential::Password("secret"));

        profile.use_password = false;
        assert_eq!(profile.credential(), Credential::PrivateKey("KEY"));
    }

    #[test]
    fn test_blank_fields_are_incomplete() {
        assert!(!ConnectionProfile::with_password("  ", "root", "x").is_complete());
        assert!(!ConnectionProfile::with_password("pc", "", "x").is_complete());
        assert!(ConnectionProfile::with_password("pc", "root", "").is_complete());
    }

    #[test]
    fn test_wake_broadcast_resolution() {
        let mut profile = WakeProfile::new("AA:BB:CC:DD:EE:FF");
        assert_eq!(profile.port, 9);
        assert_eq!(profile.broadcast(), None);
        assert_eq!(profile.resolved_broadcast(), "255.255.255.255");

        profile.broadcast_address = " 192.168.8.255 ".to_string();
        assert_eq!(profile.broadcast(), Some("192.168.8.255"));
    }

    #[test]
    fn test_profile_serde() {
        let profile = ConnectionProfile::with_private_key("pc", "me", "-----BEGIN-----");
        let json = serde_json::to_string(&profile).unwrap();
        let back: ConnectionProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
