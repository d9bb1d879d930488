//! Locating the program to launch

use gsmenv_core::{
    constants::{NOOP_COMMAND, PATH_VAR},
    Environment, Error, IoResultExt, Result,
};
use std::ffi::OsStr;
use std::path::PathBuf;

/// `noop` as the only word resolves and writes everything but starts nothing
pub fn is_noop(command: &[String]) -> bool {
    matches!(command, [only] if only == NOOP_COMMAND)
}

/// Search the original `PATH` for `program`.
///
/// Names containing a path separator are resolved against the working
/// directory instead.
pub fn find_program(program: &str, environment: &Environment) -> Result<PathBuf> {
    let cwd = std::env::current_dir().with_path(".", "get current directory")?;
    let program_path = which::which_in(program, search_path(environment), cwd)
        .map_err(|e| Error::executable_not_found(program, e.to_string()))?;
    tracing::debug!(program = %program_path.display(), "found program");
    Ok(program_path)
}

#[cfg(not(windows))]
fn search_path(environment: &Environment) -> Option<&OsStr> {
    environment.get_os(PATH_VAR)
}

#[cfg(windows)]
fn search_path(environment: &Environment) -> Option<&OsStr> {
    environment
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(PATH_VAR))
        .map(|(_, value)| value)
}
