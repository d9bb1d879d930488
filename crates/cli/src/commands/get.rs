use gsmenv_core::Result;
use gsmenv_env::{LaunchContext, Pipeline};
use std::io::Write;

/// Print the raw value of one secret to stdout, without a trailing newline
pub async fn execute(ctx: LaunchContext<'_>, name: &str) -> Result<()> {
    let value = Pipeline::new(ctx).fetch_named_secret(name).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(value.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
