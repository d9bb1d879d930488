//! Core domain types for the `gsmenv` application.
//!
//! ## Organization
//!
//! - **`environment`**: the ordered process environment
//! - **`secrets`**: secret names, parsed references and resolved values
//! - **`template`**: compiled value templates

pub mod environment;
pub mod secrets;
pub mod template;

pub use environment::*;
pub use secrets::*;
pub use template::*;
