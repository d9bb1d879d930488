use gsmenv_config::CredentialSource;
use gsmenv_core::{Environment, Error};
use gsmenv_secrets::credentials::application_default;
use gsmenv_secrets::provider_for;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_rsa_key.pem");

fn write_json(path: &Path, value: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn service_account_key(token_uri: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "service_account",
        "project_id": "key-project",
        "private_key_id": "abc123",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "gsmenv@key-project.iam.gserviceaccount.com",
        "client_id": "1234567890",
        "token_uri": token_uri,
    })
}

fn token_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "expires_in": 3599,
        "token_type": "Bearer"
    })
}

/// Environment whose gcloud config directory is `config_dir`
fn env_with(config_dir: &Path, extra: &[String]) -> Environment {
    let mut entries = vec![
        format!("CLOUDSDK_CONFIG={}", config_dir.display()),
        "GCE_METADATA_HOST=127.0.0.1:1".to_string(),
    ];
    entries.extend_from_slice(extra);
    Environment::from_entries(entries)
}

#[tokio::test]
async fn test_service_account_key_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ya29.service")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let key = dir.path().join("key.json");
    write_json(&key, service_account_key(&format!("{}/token", server.uri())));

    let env = env_with(
        dir.path(),
        &[format!("GOOGLE_APPLICATION_CREDENTIALS={}", key.display())],
    );
    let credentials = application_default(&env).unwrap();

    assert_eq!(credentials.name(), "service account");
    assert_eq!(
        credentials.project_id().await.unwrap(),
        Some("key-project".to_string())
    );
    assert_eq!(credentials.access_token().await.unwrap(), "ya29.service");
    assert_eq!(credentials.access_token().await.unwrap(), "ya29.service");
}

#[tokio::test]
async fn test_authorized_user_in_gcloud_config_dir() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-me"))
        .and(body_string_contains("client_id=user-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ya29.user")))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_json(
        &dir.path().join("application_default_credentials.json"),
        serde_json::json!({
            "type": "authorized_user",
            "client_id": "user-client",
            "client_secret": "user-secret",
            "refresh_token": "refresh-me",
            "token_uri": format!("{}/token", server.uri()),
        }),
    );

    let credentials = application_default(&env_with(dir.path(), &[])).unwrap();

    assert_eq!(credentials.name(), "authorized user");
    assert_eq!(credentials.project_id().await.unwrap(), None);
    assert_eq!(credentials.access_token().await.unwrap(), "ya29.user");
}

#[tokio::test]
async fn test_explicit_key_file_wins_over_gcloud_file() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir.path().join("application_default_credentials.json"),
        serde_json::json!({
            "type": "authorized_user",
            "client_id": "user-client",
            "client_secret": "user-secret",
            "refresh_token": "refresh-me",
        }),
    );
    let key = dir.path().join("key.json");
    write_json(&key, service_account_key("http://127.0.0.1:1/token"));

    let env = env_with(
        dir.path(),
        &[format!("GOOGLE_APPLICATION_CREDENTIALS={}", key.display())],
    );
    assert_eq!(application_default(&env).unwrap().name(), "service account");
}

#[tokio::test]
async fn test_metadata_server_is_the_last_resort() {
    let dir = TempDir::new().unwrap();
    let credentials = application_default(&env_with(dir.path(), &[])).unwrap();
    assert_eq!(credentials.name(), "metadata");
}

#[tokio::test]
async fn test_missing_key_file_defers_the_failure() {
    let dir = TempDir::new().unwrap();
    let env = env_with(
        dir.path(),
        &[format!(
            "GOOGLE_APPLICATION_CREDENTIALS={}",
            dir.path().join("missing.json").display()
        )],
    );

    assert!(application_default(&env).is_err());

    let credentials = provider_for(CredentialSource::ApplicationDefault, &env);
    assert_eq!(credentials.name(), "unavailable");
    let err = credentials.access_token().await.unwrap_err();
    assert!(matches!(err, Error::Credentials { .. }));
    assert!(err.to_string().contains("could not find default credentials"));
}

#[tokio::test]
async fn test_rejected_token_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let key = dir.path().join("key.json");
    write_json(&key, service_account_key(&format!("{}/token", server.uri())));

    let env = env_with(
        dir.path(),
        &[format!("GOOGLE_APPLICATION_CREDENTIALS={}", key.display())],
    );
    let err = application_default(&env)
        .unwrap()
        .access_token()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Credentials { .. }));
    assert!(err.to_string().contains("invalid_grant"));
}
