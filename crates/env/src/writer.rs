//! Destination writer
//!
//! Runs after every reference has resolved, so a failed launch never leaves
//! a partial set of destination files behind.

use crate::materializer::ResolvedSecrets;
use gsmenv_core::{IoResultExt, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Write every value that has a destination, then apply its file mode
pub fn write_destinations(resolved: &ResolvedSecrets) -> Result<()> {
    for (reference, value) in resolved.iter() {
        let Some(destination) = reference.destination() else {
            continue;
        };
        write_destination(destination, value.value(), reference.file_mode())?;
        tracing::debug!(
            variable = %reference.name(),
            destination = %destination.display(),
            "wrote secret to destination"
        );
    }
    Ok(())
}

fn write_destination(path: &Path, contents: &str, mode: Option<u32>) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    apply_create_mode(&mut options, mode);

    let mut file = options.open(path).with_path(path, "open")?;
    file.write_all(contents.as_bytes()).with_path(path, "write")?;
    file.sync_all().with_path(path, "sync")?;
    drop(file);

    if let Some(mode) = mode {
        set_mode(path, mode)?;
    }
    Ok(())
}

#[cfg(unix)]
fn apply_create_mode(options: &mut OpenOptions, mode: Option<u32>) {
    use std::os::unix::fs::OpenOptionsExt;
    if let Some(mode) = mode {
        options.mode(mode);
    }
}

#[cfg(not(unix))]
fn apply_create_mode(_options: &mut OpenOptions, _mode: Option<u32>) {}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).with_path(path, "chmod")
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    tracing::debug!(
        destination = %path.display(),
        mode = format_args!("{mode:o}"),
        "file mode is not supported on this platform, ignoring"
    );
    Ok(())
}
