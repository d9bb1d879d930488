use super::CredentialProvider;
use async_trait::async_trait;
use gsmenv_core::{constants::GCLOUD_PROGRAM, Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::OnceCell;

/// Credentials of the active `gcloud` configuration
pub struct GcloudCredentials {
    program: PathBuf,
    token: OnceCell<String>,
}

impl GcloudCredentials {
    pub fn new() -> Self {
        Self::with_program(GCLOUD_PROGRAM)
    }

    /// Use a specific `gcloud` executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            token: OnceCell::new(),
        }
    }

    async fn run_gcloud_command(&self, args: &[&str]) -> Result<String> {
        let command = self.program.display().to_string();
        let arg_list = || args.iter().map(|a| a.to_string()).collect::<Vec<_>>();

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                Error::command_execution(
                    &command,
                    arg_list(),
                    format!("failed to execute, is the Google Cloud SDK installed? {e}"),
                    None,
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::command_execution(
                &command,
                arg_list(),
                stderr.trim().to_string(),
                output.status.code(),
            ));
        }

        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|e| Error::credentials(format!("gcloud output is not valid UTF-8: {e}")))
    }
}

impl Default for GcloudCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for GcloudCredentials {
    fn name(&self) -> &'static str {
        "gcloud"
    }

    async fn access_token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.run_gcloud_command(&["auth", "print-access-token"]))
            .await
            .cloned()
    }

    async fn project_id(&self) -> Result<Option<String>> {
        let project = self
            .run_gcloud_command(&["config", "get-value", "project"])
            .await?;
        Ok(Some(project).filter(|p| !p.is_empty() && p != "(unset)"))
    }
}
