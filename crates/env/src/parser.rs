//! Reference parser
//!
//! A reference is any environment value starting with `gcp:`. After macro
//! expansion the remainder is read as a URI path with an optional query:
//!
//! ```text
//! gcp:///my-project/db-password?destination=/run/secrets/db&chmod=0600
//! ```
//!
//! Recognized options are `default`, `destination`, `template` and `chmod`.

use crate::context::LaunchContext;
use crate::expand::expand;
use crate::resolver::resolve_secret_name;
use gsmenv_core::{constants::REFERENCE_PREFIX, Error, Result, SecretReference, ValueTemplate};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use url::Url;

const MAX_FILE_MODE: u32 = 0o7777;

/// Parse every reference in the context's environment, in order.
///
/// The first malformed reference aborts the whole batch. Secret names that
/// cannot be resolved are logged and kept, so fallbacks still apply.
pub fn parse_references(ctx: &LaunchContext<'_>) -> Result<Vec<SecretReference>> {
    let mut references = Vec::new();
    for (name, value) in ctx.environment().iter() {
        let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
            if value.to_string_lossy().starts_with(REFERENCE_PREFIX) {
                return Err(Error::configuration(format!(
                    "environment variable {} has a gcp: uri that is not valid UTF-8",
                    name.to_string_lossy()
                )));
            }
            continue;
        };
        if let Some(reference) = parse_reference(ctx, name, value)? {
            references.push(reference);
        }
    }
    tracing::debug!(count = references.len(), "parsed secret references");
    Ok(references)
}

/// Parse a single environment entry; `None` when it is not a reference
pub fn parse_reference(
    ctx: &LaunchContext<'_>,
    name: &str,
    value: &str,
) -> Result<Option<SecretReference>> {
    let Some(rest) = value.strip_prefix(REFERENCE_PREFIX) else {
        return Ok(None);
    };

    let expanded = expand(rest, ctx.environment());
    let uri = Url::parse(&format!("{REFERENCE_PREFIX}{expanded}")).map_err(|e| {
        Error::configuration(format!("failed to parse environment variable {name}, {e}"))
    })?;

    if uri.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(Error::configuration(format!(
            "environment variable {name} has a gcp: uri, but specified a host. add a /."
        )));
    }

    let path = percent_decode_str(raw_path(&expanded))
        .decode_utf8()
        .map_err(|e| {
            Error::configuration(format!(
                "environment variable {name} has an invalid path, {e}"
            ))
        })?
        .into_owned();

    let options = query_options(name, &uri)?;
    let option = |key: &str| options.get(key).filter(|v| !v.is_empty());

    let resolved = resolve_secret_name(&path, ctx.project()).map_err(|e| {
        tracing::error!(variable = %name, path = %path, "{e}");
        e.to_string()
    });

    let mut reference = SecretReference::new(name, &path, resolved);

    if let Some(default) = option("default") {
        reference = reference.with_default_value(default);
    }
    if let Some(destination) = option("destination") {
        reference = reference.with_destination(destination);
    }
    if let Some(source) = option("template") {
        let template = ValueTemplate::compile(source).map_err(|e| {
            Error::configuration(format!(
                "environment variable {name} has an invalid template syntax, {e}"
            ))
        })?;
        reference = reference.with_template(template);
    }
    if let Some(chmod) = option("chmod") {
        reference = reference.with_file_mode(parse_file_mode(chmod)?);
    }

    tracing::debug!(
        variable = %name,
        secret = %reference.display_name(),
        destination = ?reference.destination(),
        "found secret reference"
    );
    Ok(Some(reference))
}

/// Path as written, without the dot-segment normalization `Url` applies
fn raw_path(expanded: &str) -> &str {
    let end = expanded.find(['?', '#']).unwrap_or(expanded.len());
    let path = &expanded[..end];
    match path.strip_prefix("//") {
        Some(rest) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => path,
    }
}

/// First value of every query key
fn query_options(name: &str, uri: &Url) -> Result<HashMap<String, String>> {
    if let Some(query) = uri.query() {
        check_escapes(query).map_err(|escape| {
            Error::configuration(format!(
                "environment variable {name} has an invalid query syntax, invalid URL escape \"{escape}\""
            ))
        })?;
    }

    let mut options = HashMap::new();
    for (key, value) in uri.query_pairs() {
        options
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    Ok(options)
}

/// Reject `%` not followed by two hex digits, returning the bad escape
fn check_escapes(query: &str) -> std::result::Result<(), String> {
    let bytes = query.as_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if *byte != b'%' {
            continue;
        }
        let digits = bytes.get(i + 1..i + 3);
        if !digits.is_some_and(|d| d.iter().all(u8::is_ascii_hexdigit)) {
            let end = (i + 3).min(bytes.len());
            return Err(String::from_utf8_lossy(&bytes[i..end]).into_owned());
        }
    }
    Ok(())
}

fn parse_file_mode(chmod: &str) -> Result<u32> {
    let mode = u32::from_str_radix(chmod, 8)
        .map_err(|e| Error::configuration(format!("chmod '{chmod}' is not valid, {e}")))?;
    if mode > MAX_FILE_MODE {
        return Err(Error::configuration(format!(
            "chmod '{chmod}' is not valid, mode out of range"
        )));
    }
    Ok(mode)
}
