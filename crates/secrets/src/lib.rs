//! Access to Google Secret Manager
//!
//! The pipeline only ever needs one operation from the secret store: fetch
//! the payload of a fully-qualified secret version. [`SecretStoreClient`]
//! captures that, [`SecretManagerClient`] implements it over the REST API,
//! and the [`credentials`] module supplies tokens and the default project.

mod client;
pub mod credentials;
mod manager;
pub mod testing;

pub use client::{SecretStoreClient, UnavailableClient};
pub use credentials::{provider_for, CredentialProvider};
pub use manager::SecretManagerClient;

use gsmenv_config::Config;
use std::sync::Arc;

/// Build the client for this invocation.
///
/// Without a project every fetch fails with the same error, which leaves
/// defaults and destination files usable as fallbacks.
pub fn connect(
    config: &Config,
    credentials: Arc<dyn CredentialProvider>,
) -> Box<dyn SecretStoreClient> {
    if config.project().is_none() {
        return Box::new(UnavailableClient::new(
            "no project specified and no default project set",
        ));
    }
    tracing::debug!(
        source = %config.credential_source(),
        endpoint = %config.secretmanager_endpoint(),
        "connecting to secret manager"
    );
    Box::new(SecretManagerClient::new(
        config.secretmanager_endpoint(),
        credentials,
    ))
}
