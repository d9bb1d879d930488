//! `$VAR` / `${VAR}` expansion of reference values

use gsmenv_core::Environment;

/// Expand `$VAR` and `${VAR}` against `environment`.
///
/// Unset variables expand to the empty string.
pub fn expand(value: &str, environment: &Environment) -> String {
    shellexpand::env_with_context_no_errors(value, |name| {
        Some(environment.get(name).unwrap_or_else(|| {
            tracing::debug!(
                variable = %name,
                "environment variable is not set, returning empty string"
            );
            ""
        }))
    })
    .into_owned()
}
