//! Secret store client abstraction

use async_trait::async_trait;
use gsmenv_core::{Error, Result, SecretName};

/// Trait for fetching secret payloads by fully-qualified name
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    /// Fetch the raw payload of a secret version
    ///
    /// # Returns
    /// * `Ok(bytes)` - The payload of the version
    /// * `Err(error)` - Not found, permission denied, transport failure, or
    ///   any other reason the payload could not be read
    async fn access_secret_version(&self, name: &SecretName) -> Result<Vec<u8>>;
}

/// Client used when no working client could be built; every fetch fails
/// with the same reason
#[derive(Debug, Clone)]
pub struct UnavailableClient {
    reason: String,
}

impl UnavailableClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SecretStoreClient for UnavailableClient {
    async fn access_secret_version(&self, name: &SecretName) -> Result<Vec<u8>> {
        Err(Error::secret_resolution(name.to_string(), self.reason.clone()))
    }
}
