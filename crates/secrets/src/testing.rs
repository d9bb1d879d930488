//! In-memory secret store for tests

use crate::client::SecretStoreClient;
use async_trait::async_trait;
use gsmenv_core::{Error, Result, SecretName};
use std::collections::HashMap;
use std::sync::Mutex;

/// Secret store backed by a map of canonical names to payloads.
///
/// Unknown names fail like a `NOT_FOUND` response. Every request is recorded
/// so tests can assert on fetch order and count.
#[derive(Debug, Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret under its canonical name
    #[must_use]
    pub fn with_secret(mut self, name: &str, payload: impl Into<Vec<u8>>) -> Self {
        self.secrets.insert(name.to_string(), payload.into());
        self
    }

    /// Names requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SecretStoreClient for StaticSecretStore {
    async fn access_secret_version(&self, name: &SecretName) -> Result<Vec<u8>> {
        let name = name.to_string();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(name.clone());

        self.secrets
            .get(&name)
            .cloned()
            .ok_or_else(|| Error::secret_resolution(name, "NOT_FOUND: secret version not found"))
    }
}
