//! Secret reference resolution for gsmenv
//!
//! Data flows strictly forward through the stages of a launch:
//!
//! 1. [`parser`] turns `gcp:` environment entries into [`SecretReference`]s
//! 2. [`resolver`] qualifies partial secret paths
//! 3. [`materializer`] fetches values and applies the fallback policy
//! 4. [`writer`] persists values to their destination files
//! 5. [`reconciler`] builds the environment for the child process
//!
//! [`Pipeline`] runs all of them in order.
//!
//! [`SecretReference`]: gsmenv_core::SecretReference

pub mod context;
pub mod expand;
pub mod materializer;
pub mod parser;
pub mod pipeline;
pub mod reconciler;
pub mod resolver;
pub mod writer;

pub use context::LaunchContext;
pub use expand::expand;
pub use materializer::{Materializer, ResolvedSecrets};
pub use parser::{parse_reference, parse_references};
pub use pipeline::{Pipeline, PreparedLaunch};
pub use reconciler::reconcile;
pub use resolver::resolve_secret_name;
pub use writer::write_destinations;
