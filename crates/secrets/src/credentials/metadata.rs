use super::CredentialProvider;
use async_trait::async_trait;
use gsmenv_core::{
    constants::{DEFAULT_METADATA_HOST, GCE_METADATA_HOST_VAR},
    Environment, Error, Result,
};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Application default credentials served by the GCE/GKE metadata server
pub struct MetadataCredentials {
    http: reqwest::Client,
    base_url: String,
    token: OnceCell<String>,
}

impl MetadataCredentials {
    /// `host` may be a bare `host[:port]` or a full URL
    pub fn new(host: &str) -> Result<Self> {
        let root = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", host.trim_end_matches('/'))
        };
        let http = reqwest::Client::builder()
            .timeout(METADATA_TIMEOUT)
            .build()
            .map_err(|e| Error::credentials(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: format!("{root}/computeMetadata/v1"),
            token: OnceCell::new(),
        })
    }

    /// Honors `GCE_METADATA_HOST` the same way Google's client libraries do
    pub fn from_environment(environment: &Environment) -> Result<Self> {
        let host = environment
            .get(GCE_METADATA_HOST_VAR)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_METADATA_HOST);
        Self::new(host)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| Error::network(&url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::credentials(format!(
                "metadata server returned {} for {path}",
                response.status()
            )));
        }
        Ok(response)
    }

    async fn fetch_token(&self) -> Result<String> {
        let token: TokenResponse = self
            .get("instance/service-accounts/default/token")
            .await?
            .json()
            .await
            .map_err(|e| Error::credentials(format!("invalid token response: {e}")))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl CredentialProvider for MetadataCredentials {
    fn name(&self) -> &'static str {
        "metadata"
    }

    async fn access_token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.fetch_token())
            .await
            .cloned()
    }

    async fn project_id(&self) -> Result<Option<String>> {
        let project = self
            .get("project/project-id")
            .await?
            .text()
            .await
            .map_err(|e| Error::credentials(format!("invalid project response: {e}")))?;
        let project = project.trim();
        Ok((!project.is_empty()).then(|| project.to_string()))
    }
}
