//! Settings persistence
//!
//! Profiles are flattened into a string key/value map. The encrypted file
//! store seals the whole map; the memory store keeps it as-is.

#[cfg(feature = "crypto")]
mod encrypted;
mod memory;

#[cfg(feature = "crypto")]
pub use encrypted::EncryptedFileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;
use wakeshut_types::{ConnectionProfile, WakeProfile};

/// Flattened settings
pub type Entries = BTreeMap<String, String>;

const KEY_HOST: &str = "host";
const KEY_PORT: &str = "port";
const KEY_USERNAME: &str = "username";
const KEY_USE_PASSWORD: &str = "use_password";
const KEY_PASSWORD: &str = "password";
const KEY_PRIVATE_KEY: &str = "private_key";
const KEY_WOL_MAC: &str = "wol_mac";
const KEY_WOL_BROADCAST: &str = "wol_broadcast";
const KEY_WOL_PORT: &str = "wol_port";

pub(crate) fn connection_from_entries(entries: &Entries) -> ConnectionProfile {
    let defaults = ConnectionProfile::default();
    ConnectionProfile {
        host: get_string(entries, KEY_HOST),
        port: get_parsed(entries, KEY_PORT, defaults.port),
        username: get_string(entries, KEY_USERNAME),
        use_password: get_parsed(entries, KEY_USE_PASSWORD, defaults.use_password),
        password: get_string(entries, KEY_PASSWORD),
        private_key_pem: get_string(entries, KEY_PRIVATE_KEY),
    }
}

pub(crate) fn connection_into_entries(profile: &ConnectionProfile, entries: &mut Entries) {
    entries.insert(KEY_HOST.into(), profile.host.clone());
    entries.insert(KEY_PORT.into(), profile.port.to_string());
    entries.insert(KEY_USERNAME.into(), profile.username.clone());
    entries.insert(KEY_USE_PASSWORD.into(), profile.use_password.to_string());
    entries.insert(KEY_PASSWORD.into(), profile.password.clone());
    entries.insert(KEY_PRIVATE_KEY.into(), profile.private_key_pem.clone());
}

pub(crate) fn wake_from_entries(entries: &Entries) -> WakeProfile {
    WakeProfile {
        mac_address: get_string(entries, KEY_WOL_MAC),
        broadcast_address: get_string(entries, KEY_WOL_BROADCAST),
        port: get_parsed(entries, KEY_WOL_PORT, WakeProfile::default().port),
    }
}

pub(crate) fn wake_into_entries(profile: &WakeProfile, entries: &mut Entries) {
    entries.insert(KEY_WOL_MAC.into(), profile.mac_address.clone());
    entries.insert(KEY_WOL_BROADCAST.into(), profile.broadcast_address.clone());
    entries.insert(KEY_WOL_PORT.into(), profile.port.to_string());
}

fn get_string(entries: &Entries, key: &str) -> String {
    entries.get(key).cloned().unwrap_or_default()
}

fn get_parsed<T: FromStr + Copy>(entries: &Entries, key: &str, default: T) -> T {
    match entries.get(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable setting {}={:?}", key, raw);
            default
        }),
    }
}
