use gsmenv_core::{Environment, Error, Result};
use nix::unistd::execve;
use std::convert::Infallible;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Replace the current process; only returns on failure
pub fn exec(program: &Path, args: &[String], environment: &Environment) -> Error {
    match replace_process(program, args, environment) {
        Ok(never) => match never {},
        Err(e) => e,
    }
}

fn replace_process(program: &Path, args: &[String], environment: &Environment) -> Result<Infallible> {
    let failure = |message: String| {
        Error::command_execution(program.display().to_string(), args.to_vec(), message, None)
    };
    let c_string = |bytes: &[u8]| {
        CString::new(bytes).map_err(|e| failure(format!("contains a NUL byte: {e}")))
    };

    let path = c_string(program.as_os_str().as_bytes())?;
    let argv = args
        .iter()
        .map(|arg| c_string(arg.as_bytes()))
        .collect::<Result<Vec<_>>>()?;
    let envp = environment
        .to_entries()
        .iter()
        .map(|entry| c_string(entry.as_bytes()))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(program = %program.display(), "replacing process");
    execve(&path, &argv, &envp).map_err(|errno| failure(format!("failed to execute: {errno}")))
}
