//! Replacing the current process with the target program
//!
//! On Unix the process image is replaced in place with `execve`, so the
//! program keeps this process id, open descriptors and signal disposition.
//! Elsewhere the program is spawned with inherited standard streams and this
//! process exits with its status; that is an approximation, not an exact
//! equivalent.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::exec;
#[cfg(windows)]
pub use windows::exec;
