//! Configuration loader for gsmenv
//!
//! Collects the runtime options gathered at startup and applies the project
//! precedence: explicit override, then `GOOGLE_CLOUD_PROJECT`, then the
//! credential provider's default.

use crate::config::{Config, CredentialSource};
use gsmenv_core::{
    constants::{DEFAULT_SECRETMANAGER_ENDPOINT, GOOGLE_CLOUD_PROJECT_VAR, SECRETMANAGER_ENDPOINT_VAR},
    Environment, Error, Result,
};

/// Builder that produces the immutable [`Config`]
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project: Option<String>,
    credential_source: Option<CredentialSource>,
    credential_project: Option<String>,
    environment: Option<Environment>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit project override, typically `--project`
    pub fn project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn credential_source(mut self, source: CredentialSource) -> Self {
        self.credential_source = Some(source);
        self
    }

    /// Default project reported by the credential provider
    pub fn credential_project(mut self, project: Option<String>) -> Self {
        self.credential_project = project;
        self
    }

    /// Environment snapshot; defaults to the current process environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Config> {
        let environment = self.environment.unwrap_or_else(Environment::capture);

        let project = first_non_empty([
            self.project,
            environment.get(GOOGLE_CLOUD_PROJECT_VAR).map(str::to_string),
            self.credential_project,
        ]);

        if let Some(project) = &project {
            if project.contains('/') {
                return Err(Error::configuration(format!(
                    "project id '{project}' must not contain '/'"
                )));
            }
            tracing::debug!(project = %project, "using project");
        } else {
            tracing::debug!("no project specified and no default project set");
        }

        let secretmanager_endpoint = environment
            .get(SECRETMANAGER_ENDPOINT_VAR)
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or(DEFAULT_SECRETMANAGER_ENDPOINT)
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            project,
            credential_source: self
                .credential_source
                .unwrap_or(CredentialSource::ApplicationDefault),
            secretmanager_endpoint,
            environment,
        })
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(entries: &[&str]) -> Environment {
        Environment::from_entries(entries)
    }

    #[test]
    fn test_explicit_project_wins() {
        let config = ConfigLoader::new()
            .environment(env(&["GOOGLE_CLOUD_PROJECT=from-env"]))
            .project(Some("explicit".to_string()))
            .credential_project(Some("from-credentials".to_string()))
            .load()
            .unwrap();
        assert_eq!(config.project(), Some("explicit"));
    }

    #[test]
    fn test_environment_beats_credential_default() {
        let config = ConfigLoader::new()
            .environment(env(&["GOOGLE_CLOUD_PROJECT=from-env"]))
            .credential_project(Some("from-credentials".to_string()))
            .load()
            .unwrap();
        assert_eq!(config.project(), Some("from-env"));
    }

    #[test]
    fn test_credential_default_is_last_resort() {
        let config = ConfigLoader::new()
            .environment(env(&["GOOGLE_CLOUD_PROJECT="]))
            .project(Some(String::new()))
            .credential_project(Some("from-credentials".to_string()))
            .load()
            .unwrap();
        assert_eq!(config.project(), Some("from-credentials"));
    }

    #[test]
    fn test_no_project_is_allowed() {
        let config = ConfigLoader::new().environment(env(&[])).load().unwrap();
        assert_eq!(config.project(), None);
        assert_eq!(
            config.credential_source(),
            CredentialSource::ApplicationDefault
        );
    }

    #[test]
    fn test_project_with_slash_is_rejected() {
        let err = ConfigLoader::new()
            .environment(env(&[]))
            .project(Some("a/b".to_string()))
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_endpoint_override() {
        let config = ConfigLoader::new()
            .environment(env(&["GSMENV_SECRETMANAGER_ENDPOINT=http://127.0.0.1:8085/"]))
            .load()
            .unwrap();
        assert_eq!(config.secretmanager_endpoint(), "http://127.0.0.1:8085");

        let config = ConfigLoader::new().environment(env(&[])).load().unwrap();
        assert_eq!(
            config.secretmanager_endpoint(),
            "https://secretmanager.googleapis.com"
        );
    }
}
