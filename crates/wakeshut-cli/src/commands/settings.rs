//! Settings command - view and edit the stored profiles

use crate::config::{App, SettingsManager};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use wakeshut_types::{ConnectionProfile, SettingsOpState, WakeProfile};

pub struct SshOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: bool,
    pub key_file: Option<PathBuf>,
}

impl SshOptions {
    fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.port.is_none()
            && self.user.is_none()
            && !self.password
            && self.key_file.is_none()
    }
}

/// Print both profiles with secrets masked
pub async fn show() -> Result<()> {
    let app = App::load()?;
    let controller = app.settings_controller();
    let conn = controller.connection_profile();
    let wake = controller.wake_profile();

    println!("{}", "SSH:".cyan());
    println!("   Host: {}", or_unset(&conn.host));
    println!("   Port: {}", conn.port);
    println!("   User: {}", or_unset(&conn.username));
    if conn.use_password {
        println!("   Auth: password ({})", mask(&conn.password));
    } else {
        println!("   Auth: private key ({})", mask(&conn.private_key_pem));
    }
    println!();

    println!("{}", "Wake-on-LAN:".cyan());
    println!("   MAC: {}", or_unset(&wake.mac_address));
    println!("   Broadcast: {}", wake.resolved_broadcast());
    println!("   Port: {}", wake.port);
    println!();

    println!("{}", "Files:".cyan());
    println!(
        "   Home: {}",
        SettingsManager::home()?.display().to_string().dimmed()
    );
    println!(
        "   Config: {}",
        SettingsManager::config_path()?.display().to_string().dimmed()
    );

    Ok(())
}

/// Edit the SSH draft from flags, prompting for everything when none are given
pub async fn edit_ssh(options: SshOptions) -> Result<()> {
    let app = App::load()?;
    let controller = app.settings_controller();
    let current = controller.connection_profile();

    let profile = if options.is_empty() {
        prompt_connection(current)?
    } else {
        apply_ssh_options(current, options)?
    };

    controller.update_connection_profile(profile);
    report(controller.save_connection_profile())
}

/// Edit the Wake-on-LAN draft from flags, prompting when none are given
pub async fn edit_wol(
    mac: Option<String>,
    broadcast: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let app = App::load()?;
    let controller = app.settings_controller();
    let mut profile = controller.wake_profile();

    if mac.is_none() && broadcast.is_none() && port.is_none() {
        profile = prompt_wake(profile)?;
    } else {
        if let Some(mac) = mac {
            profile.mac_address = mac.trim().to_string();
        }
        if let Some(broadcast) = broadcast {
            profile.broadcast_address = broadcast.trim().to_string();
        }
        if let Some(port) = port {
            profile.port = port;
        }
    }

    controller.update_wake_profile(profile);
    report(controller.save_wake_profile())
}

fn report(state: SettingsOpState) -> Result<()> {
    match state {
        SettingsOpState::Saved(msg) => {
            println!("{} {}", "✓".green(), msg);
            Ok(())
        }
        SettingsOpState::Failed(msg) => anyhow::bail!(msg),
        SettingsOpState::Idle | SettingsOpState::Saving => Ok(()),
    }
}

fn apply_ssh_options(mut profile: ConnectionProfile, options: SshOptions) -> Result<ConnectionProfile> {
    if let Some(host) = options.host {
        profile.host = host.trim().to_string();
    }
    if let Some(port) = options.port {
        profile.port = port;
    }
    if let Some(user) = options.user {
        profile.username = user.trim().to_string();
    }

    if options.password {
        profile.use_password = true;
        profile.password = dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?;
    } else if let Some(path) = options.key_file {
        profile.use_password = false;
        profile.private_key_pem = read_key_file(&path)?;
    }

    Ok(profile)
}

fn prompt_connection(mut profile: ConnectionProfile) -> Result<ConnectionProfile> {
    profile.host = dialoguer::Input::new()
        .with_prompt("Host")
        .with_initial_text(profile.host.clone())
        .interact_text()?;

    profile.port = dialoguer::Input::new()
        .with_prompt("Port")
        .default(profile.port)
        .interact_text()?;

    profile.username = dialoguer::Input::new()
        .with_prompt("User")
        .with_initial_text(profile.username.clone())
        .interact_text()?;

    profile.use_password = dialoguer::Confirm::new()
        .with_prompt("Use password authentication?")
        .default(profile.use_password)
        .interact()?;

    if profile.use_password {
        profile.password = dialoguer::Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?;
    } else {
        let path: String = dialoguer::Input::new()
            .with_prompt("Private key file")
            .interact_text()?;
        profile.private_key_pem = read_key_file(Path::new(path.trim()))?;
    }

    Ok(profile)
}

fn prompt_wake(mut profile: WakeProfile) -> Result<WakeProfile> {
    profile.mac_address = dialoguer::Input::new()
        .with_prompt("MAC address")
        .with_initial_text(profile.mac_address.clone())
        .interact_text()?;

    profile.broadcast_address = dialoguer::Input::new()
        .with_prompt("Broadcast address (blank for 255.255.255.255)")
        .with_initial_text(profile.broadcast_address.clone())
        .allow_empty(true)
        .interact_text()?;

    profile.port = dialoguer::Input::new()
        .with_prompt("Port")
        .default(profile.port)
        .interact_text()?;

    Ok(profile)
}

fn read_key_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read private key from {:?}", path))
}

fn or_unset(value: &str) -> String {
    if value.trim().is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        value.to_string()
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "not set".to_string()
    } else {
        "********".to_string()
    }
}
