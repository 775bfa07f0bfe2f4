//! CLI commands

pub mod settings;
pub mod shutdown;
pub mod test;
pub mod wake;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Show a spinner until the state published on `rx` satisfies `done`.
///
/// Returns the final state. Without a task nothing was started, so the
/// current state is returned right away.
pub async fn follow<S: Clone>(
    mut rx: watch::Receiver<S>,
    task: Option<JoinHandle<()>>,
    message: &str,
    done: impl Fn(&S) -> bool,
) -> Result<S> {
    let Some(task) = task else {
        return Ok(rx.borrow().clone());
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let state = rx.wait_for(|s| done(s)).await.map(|s| s.clone());
    task.await?;
    spinner.finish_and_clear();

    match state {
        Ok(state) => Ok(state),
        // Sender dropped; fall back to the last published value
        Err(_) => Ok(rx.borrow().clone()),
    }
}
