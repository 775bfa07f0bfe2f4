//! Settings file encrypted at rest

use super::{
    connection_from_entries, connection_into_entries, wake_from_entries, wake_into_entries,
    Entries,
};
use crate::crypto::{generate_key, SecretBox, SecretKey};
use crate::ports::SettingsStore;
use crate::{Result, WakeshutError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use wakeshut_types::{ConnectionProfile, WakeProfile};

/// Encrypted settings file name inside the home directory
pub const SETTINGS_FILE: &str = "settings.enc";

/// Key file name inside the home directory
pub const KEY_FILE: &str = "master.key";

/// Key/value settings sealed with XSalsa20-Poly1305 in a single file.
///
/// Every save rewrites the whole file through a temporary file and a
/// rename, so a profile is never persisted half-written.
pub struct EncryptedFileStore {
    path: PathBuf,
    sbox: SecretBox,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl EncryptedFileStore {
    /// Open the store in `home`, creating the key on first use
    pub fn open(home: &Path) -> Result<Self> {
        let key = load_or_create_key(&home.join(KEY_FILE))?;
        Ok(Self::with_key(home.join(SETTINGS_FILE), &key))
    }

    pub fn with_key(path: PathBuf, key: &SecretKey) -> Self {
        Self {
            path,
            sbox: SecretBox::new(key),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let sealed = std::fs::read(&self.path)?;
        let plaintext = self.sbox.open(&sealed)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let plaintext = serde_json::to_vec(entries)?;
        let sealed = self.sbox.seal(&plaintext)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("enc.tmp");
        write_private(&tmp, &sealed)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} settings to {:?}", entries.len(), self.path);
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| WakeshutError::Storage("settings lock poisoned".to_string()))?;

        let mut entries = self.read_entries()?;
        f(&mut entries);
        self.write_entries(&entries)
    }
}

impl SettingsStore for EncryptedFileStore {
    fn connection_profile(&self) -> Result<ConnectionProfile> {
        Ok(connection_from_entries(&self.read_entries()?))
    }

    fn save_connection_profile(&self, profile: &ConnectionProfile) -> Result<()> {
        self.update(|entries| connection_into_entries(profile, entries))
    }

    fn wake_profile(&self) -> Result<WakeProfile> {
        Ok(wake_from_entries(&self.read_entries()?))
    }

    fn save_wake_profile(&self, profile: &WakeProfile) -> Result<()> {
        self.update(|entries| wake_into_entries(profile, entries))
    }
}

/// Read the hex-encoded key at `path`, generating it if missing
fn load_or_create_key(path: &Path) -> Result<SecretKey> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let bytes = hex::decode(raw.trim())
            .map_err(|e| WakeshutError::Encryption(format!("Invalid key file {:?}: {}", path, e)))?;
        let key: SecretKey = bytes.try_into().map_err(|_| {
            WakeshutError::Encryption(format!("Key file {:?} must hold 32 bytes", path))
        })?;
        return Ok(key);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let key = generate_key();
    write_private(path, hex::encode(key).as_bytes())?;
    info!("Created settings key at {:?}", path);
    Ok(key)
}

/// Write `data` to `path` readable by the owner only
fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
