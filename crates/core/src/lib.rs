//! Core domain types, errors, and constants for `gsmenv`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias shared by every
//!   crate in the workspace.
//! - **`types`**: domain types such as `SecretName`, `SecretReference`,
//!   `ResolvedValue` and the ordered `Environment`.
//! - **`constants`**: environment variable names, the reference marker and
//!   other static values.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, IoResultExt, Result},
    types::*,
};
