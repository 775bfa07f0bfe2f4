//! Configuration management

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use wakeshut_core::config::CONFIG_FILE;
use wakeshut_core::{
    AppConfig, EncryptedFileStore, MainController, SettingsController, SshRunner, UdpWakeSender,
};

pub struct SettingsManager;

impl SettingsManager {
    /// Get the wakeshut home directory (~/.wakeshut)
    pub fn home() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("WAKESHUT_HOME") {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".wakeshut"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::home()?.join(CONFIG_FILE))
    }

    /// Load config.toml overlaid with WAKESHUT_* variables
    pub fn load_config() -> Result<AppConfig> {
        let path = Self::config_path()?;
        AppConfig::load(&path).with_context(|| format!("Failed to load config from {:?}", path))
    }

    /// Open the encrypted settings store
    pub fn open_store() -> Result<EncryptedFileStore> {
        let home = Self::home()?;
        EncryptedFileStore::open(&home)
            .with_context(|| format!("Failed to open settings in {:?}", home))
    }
}

/// Everything a command needs, wired from the home directory
pub struct App {
    pub config: AppConfig,
    store: Arc<EncryptedFileStore>,
    runner: Arc<SshRunner>,
    waker: Arc<UdpWakeSender>,
}

impl App {
    pub fn load() -> Result<Self> {
        let config = SettingsManager::load_config()?;
        let store = Arc::new(SettingsManager::open_store()?);
        let runner = Arc::new(SshRunner::new().with_host_key_policy(config.host_key_policy()));

        Ok(Self {
            config,
            store,
            runner,
            waker: Arc::new(UdpWakeSender),
        })
    }

    pub fn main_controller(&self) -> MainController {
        MainController::new(self.store.clone(), self.runner.clone(), self.waker.clone())
            .with_config(&self.config)
    }

    pub fn settings_controller(&self) -> SettingsController {
        SettingsController::new(self.store.clone(), self.runner.clone(), self.waker.clone())
            .with_config(&self.config)
    }
}
