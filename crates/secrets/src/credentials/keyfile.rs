use super::CredentialProvider;
use async_trait::async_trait;
use gsmenv_core::{
    constants::{CLOUD_PLATFORM_SCOPE, DEFAULT_TOKEN_URI},
    Error, IoResultExt, Result,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME: Duration = Duration::from_secs(3600);
const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Contents of a credentials JSON file, keyed on its `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsFile {
    ServiceAccount(ServiceAccountKey),
    AuthorizedUser(AuthorizedUser),
}

/// Service account key as downloaded from the console
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

/// User credentials written by `gcloud auth application-default login`
#[derive(Clone, Deserialize)]
pub struct AuthorizedUser {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for AuthorizedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedUser")
            .field("client_id", &self.client_id)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl CredentialsFile {
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn project_id(&self) -> Option<&str> {
        match self {
            Self::ServiceAccount(key) => key.project_id.as_deref(),
            Self::AuthorizedUser(user) => user.project_id.as_deref(),
        }
        .filter(|project| !project.is_empty())
    }

    fn token_uri(&self) -> &str {
        match self {
            Self::ServiceAccount(key) => key.token_uri.as_deref(),
            Self::AuthorizedUser(user) => user.token_uri.as_deref(),
        }
        .unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Credentials read from a service account key or an authorized user file
pub struct KeyFileCredentials {
    file: CredentialsFile,
    http: reqwest::Client,
    token: OnceCell<String>,
}

impl KeyFileCredentials {
    pub fn new(file: CredentialsFile) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(TOKEN_TIMEOUT)
            .build()
            .map_err(|e| Error::credentials(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            file,
            http,
            token: OnceCell::new(),
        })
    }

    /// Read and parse a credentials file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_path(path, "read credentials file")?;
        let file = CredentialsFile::from_json(&json).map_err(|e| {
            Error::credentials(format!("invalid credentials file {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded credentials file");
        Self::new(file)
    }

    async fn fetch_token(&self) -> Result<String> {
        let token_uri = self.file.token_uri();
        let form: Vec<(&str, String)> = match &self.file {
            CredentialsFile::ServiceAccount(key) => vec![
                ("grant_type", JWT_BEARER_GRANT.to_string()),
                ("assertion", signed_assertion(key, token_uri)?),
            ],
            CredentialsFile::AuthorizedUser(user) => vec![
                ("grant_type", "refresh_token".to_string()),
                ("client_id", user.client_id.clone()),
                ("client_secret", user.client_secret.clone()),
                ("refresh_token", user.refresh_token.clone()),
            ],
        };

        let response = self
            .http
            .post(token_uri)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::network(token_uri, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::credentials(format!(
                "token endpoint returned {status}: {}",
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::credentials(format!("invalid token response: {e}")))?;
        Ok(token.access_token)
    }
}

/// Self-signed JWT exchanged for an access token
fn signed_assertion(key: &ServiceAccountKey, audience: &str) -> Result<String> {
    let iat = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::credentials(format!("system clock is before 1970: {e}")))?
        .as_secs();
    let claims = Claims {
        iss: &key.client_email,
        scope: CLOUD_PLATFORM_SCOPE,
        aud: audience,
        iat,
        exp: iat + ASSERTION_LIFETIME.as_secs(),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| Error::credentials(format!("invalid service account private key: {e}")))?;
    jsonwebtoken::encode(&header, &claims, &signing_key)
        .map_err(|e| Error::credentials(format!("failed to sign token request: {e}")))
}

#[async_trait]
impl CredentialProvider for KeyFileCredentials {
    fn name(&self) -> &'static str {
        match self.file {
            CredentialsFile::ServiceAccount(_) => "service account",
            CredentialsFile::AuthorizedUser(_) => "authorized user",
        }
    }

    async fn access_token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.fetch_token())
            .await
            .cloned()
    }

    async fn project_id(&self) -> Result<Option<String>> {
        Ok(self.file.project_id().map(str::to_string))
    }
}
