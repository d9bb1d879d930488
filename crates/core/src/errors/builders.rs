//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a malformed reference error for a secret path
    #[must_use]
    pub fn malformed_reference(path: impl Into<String>) -> Self {
        Error::MalformedReference { path: path.into() }
    }

    /// Create an error for a reference that no fallback could satisfy
    #[must_use]
    pub fn secret_unavailable(
        variable: impl Into<String>,
        secret: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::SecretUnavailable {
            variable: variable.into(),
            secret: secret.into(),
            message: message.into(),
        }
    }

    /// Create a secret resolution error
    #[must_use]
    pub fn secret_resolution(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SecretResolution {
            reference: reference.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a secret resolution error with a source error
    #[must_use]
    pub fn secret_resolution_with_source(
        reference: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::SecretResolution {
            reference: reference.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a template rendering error
    #[must_use]
    pub fn template(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Template {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create an executable lookup error
    #[must_use]
    pub fn executable_not_found(program: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ExecutableNotFound {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a credentials error
    #[must_use]
    pub fn credentials(message: impl Into<String>) -> Self {
        Error::Credentials {
            message: message.into(),
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }
}
