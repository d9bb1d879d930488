//! Centralized configuration for gsmenv
//!
//! `Config` is immutable after construction and is passed explicitly to every
//! stage of the pipeline instead of living in process-wide state.

use gsmenv_core::Environment;
use std::fmt;

/// Where access tokens and the default project come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The active `gcloud` configuration
    Gcloud,
    /// Application default credentials: key file, gcloud ADC file or the
    /// metadata server
    ApplicationDefault,
}

impl CredentialSource {
    /// Application default credentials are used when requested explicitly or
    /// when `gcloud` is not installed
    #[must_use]
    pub fn select(use_default_credentials: bool, gcloud_on_path: bool) -> Self {
        if use_default_credentials || !gcloud_on_path {
            Self::ApplicationDefault
        } else {
            Self::Gcloud
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gcloud => f.write_str("gcloud configuration"),
            Self::ApplicationDefault => f.write_str("default application credentials"),
        }
    }
}

/// Immutable configuration for a single invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Ambient project used to qualify partial secret paths
    pub(crate) project: Option<String>,

    /// Credential source selected at startup
    pub(crate) credential_source: CredentialSource,

    /// Base URL of the Secret Manager API
    pub(crate) secretmanager_endpoint: String,

    /// Process environment captured at startup
    pub(crate) environment: Environment,
}

impl Config {
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    #[must_use]
    pub fn credential_source(&self) -> CredentialSource {
        self.credential_source
    }

    #[must_use]
    pub fn secretmanager_endpoint(&self) -> &str {
        &self.secretmanager_endpoint
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}
