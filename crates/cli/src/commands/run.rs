use crate::launcher::{find_program, is_noop};
use crate::platform;
use gsmenv_core::{Error, Result};
use gsmenv_env::{LaunchContext, Pipeline};

/// Resolve every reference, then replace this process with `command`
pub async fn execute(ctx: LaunchContext<'_>, command: &[String]) -> Result<()> {
    let Some(program) = command.first() else {
        return Err(Error::configuration("expected --name or a command to run"));
    };

    let launch = Pipeline::new(ctx).prepare_launch().await?;

    if is_noop(command) {
        tracing::info!("noop, not starting a process");
        return Ok(());
    }

    let program = find_program(program, ctx.environment())?;
    Err(platform::exec(&program, command, launch.environment()))
}
