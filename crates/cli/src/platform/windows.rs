use gsmenv_core::{Environment, Error};
use std::path::Path;
use std::process::Command;

/// Run the program to completion, then exit with its status; only returns
/// when the program could not be started
pub fn exec(program: &Path, args: &[String], environment: &Environment) -> Error {
    tracing::debug!(program = %program.display(), "spawning process");
    let status = Command::new(program)
        .args(args.get(1..).unwrap_or_default())
        .env_clear()
        .envs(environment.iter())
        .status();

    match status {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => Error::command_execution(
            program.display().to_string(),
            args.to_vec(),
            format!("failed to execute: {e}"),
            None,
        ),
    }
}
