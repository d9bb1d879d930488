//! Credential providers
//!
//! A provider supplies the bearer token for Secret Manager requests and,
//! optionally, a default project. Tokens are fetched lazily on first use so
//! that a credential failure surfaces as a fetch failure of the first
//! reference instead of aborting the launch up front.
//!
//! Application default credentials are looked up in order:
//! 1. the file named by `GOOGLE_APPLICATION_CREDENTIALS`
//! 2. `application_default_credentials.json` in the gcloud config directory
//! 3. the GCE/GKE metadata server

mod gcloud;
mod keyfile;
mod metadata;

pub use gcloud::GcloudCredentials;
pub use keyfile::{CredentialsFile, KeyFileCredentials};
pub use metadata::MetadataCredentials;

use async_trait::async_trait;
use gsmenv_config::CredentialSource;
use gsmenv_core::{
    constants::{ADC_FILE_NAME, CLOUDSDK_CONFIG_VAR, GOOGLE_APPLICATION_CREDENTIALS_VAR},
    Environment, Error, Result,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for acquiring an identity to talk to Secret Manager
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// OAuth2 access token for the `cloud-platform` scope
    async fn access_token(&self) -> Result<String>;

    /// Default project of the identity, if it has one
    async fn project_id(&self) -> Result<Option<String>>;
}

/// Stands in for credentials that could not be found; every call fails
/// with the original reason
pub struct UnavailableCredentials {
    reason: String,
}

impl UnavailableCredentials {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for UnavailableCredentials {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn access_token(&self) -> Result<String> {
        Err(Error::credentials(&self.reason))
    }

    async fn project_id(&self) -> Result<Option<String>> {
        Err(Error::credentials(&self.reason))
    }
}

/// Build the provider for the selected credential source
pub fn provider_for(
    source: CredentialSource,
    environment: &Environment,
) -> Arc<dyn CredentialProvider> {
    match source {
        CredentialSource::Gcloud => Arc::new(GcloudCredentials::new()),
        CredentialSource::ApplicationDefault => {
            application_default(environment).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "could not find default credentials");
                Arc::new(UnavailableCredentials::new(format!(
                    "could not find default credentials: {e}"
                )))
            })
        }
    }
}

/// Find application default credentials.
///
/// A set but unreadable `GOOGLE_APPLICATION_CREDENTIALS` is an error; the
/// lookup does not continue past it.
pub fn application_default(environment: &Environment) -> Result<Arc<dyn CredentialProvider>> {
    if let Some(path) = environment
        .get(GOOGLE_APPLICATION_CREDENTIALS_VAR)
        .filter(|path| !path.is_empty())
    {
        tracing::debug!(path, "using GOOGLE_APPLICATION_CREDENTIALS");
        return Ok(Arc::new(KeyFileCredentials::from_file(Path::new(path))?));
    }

    if let Some(path) = well_known_file(environment).filter(|path| path.is_file()) {
        tracing::debug!(path = %path.display(), "using gcloud application default credentials");
        return Ok(Arc::new(KeyFileCredentials::from_file(&path)?));
    }

    tracing::debug!("using metadata server credentials");
    Ok(Arc::new(MetadataCredentials::from_environment(environment)?))
}

/// Location `gcloud auth application-default login` writes to
fn well_known_file(environment: &Environment) -> Option<PathBuf> {
    let config_dir = match environment
        .get(CLOUDSDK_CONFIG_VAR)
        .filter(|dir| !dir.is_empty())
    {
        Some(dir) => PathBuf::from(dir),
        None => gcloud_config_dir(environment)?,
    };
    Some(config_dir.join(ADC_FILE_NAME))
}

#[cfg(not(windows))]
fn gcloud_config_dir(environment: &Environment) -> Option<PathBuf> {
    environment
        .get("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .map(|home| home.join(".config").join("gcloud"))
}

#[cfg(windows)]
fn gcloud_config_dir(environment: &Environment) -> Option<PathBuf> {
    environment
        .get("APPDATA")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("gcloud"))
}
