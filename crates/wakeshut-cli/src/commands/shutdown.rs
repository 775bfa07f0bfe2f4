//! Shutdown command

use super::follow;
use crate::config::App;
use anyhow::Result;
use colored::Colorize;
use wakeshut_types::ViewState;

pub async fn execute(yes: bool) -> Result<()> {
    let app = App::load()?;
    let controller = app.main_controller();

    if !yes {
        let confirm: bool = dialoguer::Confirm::new()
            .with_prompt("Shut down the remote machine?")
            .default(false)
            .interact()?;

        if !confirm {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let task = controller.request_shutdown();
    let state = follow(controller.subscribe(), task, "Sending shutdown command...", |s| {
        !s.is_running()
    })
    .await?;
    controller.acknowledge();

    report(state)
}

/// Print a finished main-screen state; failures become the command error
pub fn report(state: ViewState) -> Result<()> {
    match state {
        ViewState::Succeeded(msg) => {
            println!("{} {}", "✓".green(), msg);
            Ok(())
        }
        ViewState::Failed(msg) => anyhow::bail!(msg),
        // Only reachable if the request was ignored
        ViewState::Idle | ViewState::Running => anyhow::bail!("Another action is still running"),
    }
}
