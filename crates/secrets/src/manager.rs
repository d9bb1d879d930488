//! Secret Manager REST client

use crate::client::SecretStoreClient;
use crate::credentials::CredentialProvider;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gsmenv_core::{Error, Result, SecretName};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: String,
}

/// Fetches secret versions through `v1/{name}:access`
pub struct SecretManagerClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl SecretManagerClient {
    pub fn new(endpoint: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn access_url(&self, name: &SecretName) -> String {
        format!("{}/v1/{name}:access", self.endpoint)
    }
}

#[async_trait]
impl SecretStoreClient for SecretManagerClient {
    async fn access_secret_version(&self, name: &SecretName) -> Result<Vec<u8>> {
        let token = self.credentials.access_token().await?;
        let url = self.access_url(name);

        tracing::debug!(secret = %name, "accessing secret version");
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::network(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::secret_resolution(
                name.to_string(),
                format!("secret manager returned {status}: {}", body.trim()),
            ));
        }

        let body: AccessSecretVersionResponse = response.json().await.map_err(|e| {
            Error::secret_resolution_with_source(name.to_string(), "invalid response body", e)
        })?;

        STANDARD.decode(body.payload.data.as_bytes()).map_err(|e| {
            Error::secret_resolution_with_source(name.to_string(), "payload is not valid base64", e)
        })
    }
}
