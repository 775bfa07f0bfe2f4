//! Wake command

use super::follow;
use super::shutdown::report;
use crate::config::App;
use anyhow::Result;

pub async fn execute() -> Result<()> {
    let app = App::load()?;
    let controller = app.main_controller();

    let task = controller.request_wake();
    let state = follow(controller.subscribe(), task, "Sending magic packet...", |s| {
        !s.is_running()
    })
    .await?;
    controller.acknowledge();

    report(state)
}
