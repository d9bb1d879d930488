//! Value materializer
//!
//! Turns each reference into a concrete value: fetch, then template. When the
//! fetch fails for any reason the fallbacks apply in order:
//!
//! 1. the `default` option, rendered through the template if there is one
//! 2. the current contents of the destination file, verbatim
//! 3. otherwise the launch fails
//!
//! A template that fails to render is always fatal.

use gsmenv_core::{Error, Provenance, ResolvedValue, Result, SecretName, SecretReference};
use gsmenv_secrets::SecretStoreClient;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fetches and renders secret values one reference at a time
pub struct Materializer<'a> {
    client: &'a dyn SecretStoreClient,
}

impl<'a> Materializer<'a> {
    pub fn new(client: &'a dyn SecretStoreClient) -> Self {
        Self { client }
    }

    /// Fetch the payload of `name` as text
    pub async fn fetch(&self, name: &SecretName) -> Result<String> {
        let payload = self.client.access_secret_version(name).await?;
        String::from_utf8(payload).map_err(|e| {
            Error::secret_resolution_with_source(name.to_string(), "payload is not valid UTF-8", e)
        })
    }

    /// Resolve a single reference, applying fallbacks on fetch failure
    pub async fn materialize(&self, reference: &SecretReference) -> Result<ResolvedValue> {
        let fetched = match reference.resolved_name() {
            Ok(name) => self.fetch(name).await,
            Err(reason) => Err(Error::secret_resolution(reference.raw_path(), reason)),
        };

        match fetched {
            Ok(value) => {
                debug!(
                    variable = %reference.name(),
                    secret = %reference.display_name(),
                    "fetched secret"
                );
                let value = render(reference, value)?;
                Ok(ResolvedValue::new(value, Provenance::Fetched))
            }
            Err(cause) => fallback(reference, &cause),
        }
    }

    /// Resolve every reference in order, stopping at the first fatal error
    pub async fn materialize_all(
        &self,
        references: Vec<SecretReference>,
    ) -> Result<ResolvedSecrets> {
        let mut resolved = ResolvedSecrets::default();
        for reference in references {
            let value = self.materialize(&reference).await?;
            resolved.push(reference, value);
        }
        Ok(resolved)
    }
}

fn render(reference: &SecretReference, value: String) -> Result<String> {
    match reference.template() {
        Some(template) => template
            .render(&value)
            .map_err(|e| Error::template(reference.name(), e.to_string())),
        None => Ok(value),
    }
}

fn fallback(reference: &SecretReference, cause: &Error) -> Result<ResolvedValue> {
    if let Some(default) = reference.default_value() {
        warn!(
            variable = %reference.name(),
            secret = %reference.display_name(),
            error = %cause,
            "failed to get secret, using default value"
        );
        let value = render(reference, default.to_string())?;
        return Ok(ResolvedValue::new(value, Provenance::DefaultFallback));
    }

    let reason = match reference.destination() {
        Some(destination) => match std::fs::read_to_string(destination) {
            Ok(contents) => {
                warn!(
                    variable = %reference.name(),
                    secret = %reference.display_name(),
                    destination = %destination.display(),
                    error = %cause,
                    "failed to get secret, using existing destination file"
                );
                return Ok(ResolvedValue::new(contents, Provenance::DestinationFallback));
            }
            Err(e) => format!("destination file does not exist to provide default value ({e})"),
        },
        None => "no default value available".to_string(),
    };

    warn!(
        variable = %reference.name(),
        secret = %reference.display_name(),
        error = %cause,
        "failed to get secret, {reason}"
    );
    Err(Error::secret_unavailable(
        reference.name(),
        reference.display_name(),
        format!("{cause}, {reason}"),
    ))
}

/// Resolved values paired with their references, in environment order
#[derive(Debug, Default)]
pub struct ResolvedSecrets {
    entries: Vec<(SecretReference, ResolvedValue)>,
}

impl ResolvedSecrets {
    pub fn push(&mut self, reference: SecretReference, value: ResolvedValue) {
        self.entries.push((reference, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SecretReference, &ResolvedValue)> {
        self.entries.iter().map(|(reference, value)| (reference, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// What each variable should be replaced with in the child environment:
    /// the destination path when there is one, otherwise the value.
    ///
    /// Later references with the same variable name overwrite earlier ones.
    pub fn substitutions(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(reference, value)| {
                let replacement = match reference.destination() {
                    Some(destination) => destination.display().to_string(),
                    None => value.value().to_string(),
                };
                (reference.name().to_string(), replacement)
            })
            .collect()
    }
}
