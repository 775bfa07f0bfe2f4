//! In-memory settings store

use super::{
    connection_from_entries, connection_into_entries, wake_from_entries, wake_into_entries,
    Entries,
};
use crate::ports::SettingsStore;
use crate::{Result, WakeshutError};
use std::sync::RwLock;
use wakeshut_types::{ConnectionProfile, WakeProfile};

/// Volatile store; settings are lost when it is dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with both profiles
    pub fn with_profiles(connection: &ConnectionProfile, wake: &WakeProfile) -> Self {
        let mut entries = Entries::new();
        connection_into_entries(connection, &mut entries);
        wake_into_entries(wake, &mut entries);
        Self {
            entries: RwLock::new(entries),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Entries) -> T) -> Result<T> {
        let entries = self
            .entries
            .read()
            .map_err(|_| WakeshutError::Storage("settings lock poisoned".to_string()))?;
        Ok(f(&entries))
    }

    fn write(&self, f: impl FnOnce(&mut Entries)) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WakeshutError::Storage("settings lock poisoned".to_string()))?;
        f(&mut entries);
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn connection_profile(&self) -> Result<ConnectionProfile> {
        self.read(connection_from_entries)
    }

    fn save_connection_profile(&self, profile: &ConnectionProfile) -> Result<()> {
        self.write(|entries| connection_into_entries(profile, entries))
    }

    fn wake_profile(&self) -> Result<WakeProfile> {
        self.read(wake_from_entries)
    }

    fn save_wake_profile(&self, profile: &WakeProfile) -> Result<()> {
        self.write(|entries| wake_into_entries(profile, entries))
    }
}
