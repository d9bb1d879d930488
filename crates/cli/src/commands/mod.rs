pub mod get;
pub mod run;

use gsmenv_core::{constants::GOOGLE_CLOUD_PROJECT_VAR, Environment};
use gsmenv_secrets::CredentialProvider;

/// Default project of the credentials, only asked for when neither
/// `--project` nor `GOOGLE_CLOUD_PROJECT` provides one
pub async fn credential_project(
    credentials: &dyn CredentialProvider,
    explicit: Option<&str>,
    environment: &Environment,
) -> Option<String> {
    let given = |project: Option<&str>| project.is_some_and(|p| !p.is_empty());
    if given(explicit) || given(environment.get(GOOGLE_CLOUD_PROJECT_VAR)) {
        return None;
    }

    match credentials.project_id().await {
        Ok(project) => project,
        Err(e) => {
            tracing::debug!(
                credentials = credentials.name(),
                error = %e,
                "failed to get default project"
            );
            None
        }
    }
}
