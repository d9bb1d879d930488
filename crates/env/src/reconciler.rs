//! Environment reconciler

use crate::materializer::ResolvedSecrets;
use gsmenv_core::Environment;
use std::ffi::OsStr;

/// Build the child environment from `original`.
///
/// Every entry whose name has a resolved reference is replaced, duplicates
/// included; everything else passes through unchanged and in order.
pub fn reconcile(original: &Environment, resolved: &ResolvedSecrets) -> Environment {
    let substitutions = resolved.substitutions();
    original
        .iter()
        .map(|(name, value)| {
            match name.to_str().and_then(|name| substitutions.get(name)) {
                Some(replacement) => (name, OsStr::new(replacement)),
                None => (name, value),
            }
        })
        .collect()
}
