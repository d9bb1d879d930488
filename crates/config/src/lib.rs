//! Runtime configuration for gsmenv
//!
//! This crate turns command-line flags, the captured process environment and
//! the credential provider's defaults into one immutable [`Config`].

pub mod config;
pub mod loader;

pub use config::*;
pub use loader::*;
