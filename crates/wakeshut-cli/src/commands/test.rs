//! Test commands - try the SSH settings or send a test magic packet

use super::follow;
use crate::config::App;
use anyhow::Result;
use colored::Colorize;
use std::time::Duration;
use tracing::info;
use wakeshut_core::controller::MISSING_WOL_SETTINGS;
use wakeshut_types::TestState;

/// Run the test command against the stored SSH settings
pub async fn connection(timeout_secs: Option<u64>) -> Result<()> {
    let app = App::load()?;
    let controller = app.settings_controller();
    let timeout = timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| app.config.test_timeout());

    let profile = controller.connection_profile();
    info!("Testing {} (timeout {:?})", profile.target(), timeout);

    let task = controller.test_connection(timeout);
    let state = follow(controller.subscribe_test_state(), task, "Testing connection...", |s| {
        !s.is_testing()
    })
    .await?;

    match state {
        TestState::Succeeded(msg) => {
            println!("{} {}", "✓".green(), msg);
            Ok(())
        }
        TestState::Failed(msg) => {
            println!("{} {}", "✗".red(), msg);
            anyhow::bail!("Connection test failed")
        }
        TestState::NotTested | TestState::Testing => Ok(()),
    }
}

/// Send a magic packet with the stored Wake-on-LAN settings
pub async fn wake() -> Result<()> {
    let app = App::load()?;
    let controller = app.settings_controller();
    let profile = controller.wake_profile();

    if !profile.is_complete() {
        anyhow::bail!(MISSING_WOL_SETTINGS);
    }

    if controller.send_test_wake().await {
        println!(
            "{} Test packet sent to {} via {}:{}",
            "✓".green(),
            profile.mac_address.trim(),
            profile.resolved_broadcast(),
            profile.port
        );
        Ok(())
    } else {
        anyhow::bail!(
            "Failed to send test packet to {}",
            profile.mac_address.trim()
        )
    }
}
