//! Secret names, parsed references and resolved values

use super::template::ValueTemplate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref CANONICAL_NAME: Regex =
        Regex::new(r"^projects/([^/]+)/secrets/([^/]+)/versions/([^/]+)$").unwrap();
}

/// Fully-qualified secret version name,
/// `projects/{project}/secrets/{secret}/versions/{version}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretName {
    project: String,
    secret: String,
    version: String,
}

impl SecretName {
    /// Build a name from its three components
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        secret: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            secret: secret.into(),
            version: version.into(),
        }
    }

    /// Parse a string that is already in canonical form
    #[must_use]
    pub fn parse_canonical(name: &str) -> Option<Self> {
        CANONICAL_NAME
            .captures(name)
            .map(|caps| Self::new(&caps[1], &caps[2], &caps[3]))
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/secrets/{}/versions/{}",
            self.project, self.secret, self.version
        )
    }
}

/// One secret-backed environment variable and its options.
///
/// Created once by the parser and never mutated afterwards. The resolved
/// name is computed at creation; when resolution failed, the failure message
/// is kept instead so the materializer can route it through the fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    name: String,
    raw_path: String,
    resolved_name: Result<SecretName, String>,
    default_value: Option<String>,
    destination: Option<PathBuf>,
    file_mode: Option<u32>,
    template: Option<ValueTemplate>,
}

impl SecretReference {
    /// Create a reference without options
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        raw_path: impl Into<String>,
        resolved_name: Result<SecretName, String>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_path: raw_path.into(),
            resolved_name,
            default_value: None,
            destination: None,
            file_mode: None,
            template: None,
        }
    }

    /// Literal used when the fetch fails; empty strings count as absent
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into()).filter(|v| !v.is_empty());
        self
    }

    #[must_use]
    pub fn with_destination(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.destination = (!path.as_os_str().is_empty()).then_some(path);
        self
    }

    /// Permission bits for the destination file; zero leaves them unchanged
    #[must_use]
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = (mode != 0).then_some(mode);
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: ValueTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Name of the environment variable
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Macro-expanded path as written after the marker
    #[must_use]
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// The canonical name, or the reason it could not be computed
    pub fn resolved_name(&self) -> Result<&SecretName, &str> {
        self.resolved_name.as_ref().map_err(String::as_str)
    }

    /// Resolved name for messages, falling back to the raw path
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.resolved_name {
            Ok(name) => name.to_string(),
            Err(_) => self.raw_path.clone(),
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    #[must_use]
    pub fn file_mode(&self) -> Option<u32> {
        self.file_mode
    }

    #[must_use]
    pub fn template(&self) -> Option<&ValueTemplate> {
        self.template.as_ref()
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Fetched from the secret store
    Fetched,
    /// The reference's `default` option
    DefaultFallback,
    /// Existing contents of the destination file
    DestinationFallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Fetched => "fetched",
            Self::DefaultFallback => "default",
            Self::DestinationFallback => "destination",
        };
        f.write_str(label)
    }
}

/// The concrete string for one reference in one run
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    value: String,
    provenance: Provenance,
}

impl ResolvedValue {
    #[must_use]
    pub fn new(value: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            value: value.into(),
            provenance,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedValue")
            .field("value", &"<redacted>")
            .field("provenance", &self.provenance)
            .finish()
    }
}
