//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for gsmenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gsmenv operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed reference URI, query option, template or chmod value
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Secret path does not fit any recognized shape
    #[error("invalid secret name specification: {path}")]
    MalformedReference { path: String },

    /// Fetch failed and no fallback could satisfy the reference
    #[error("failed to get secret {variable} ({secret}): {message}")]
    SecretUnavailable {
        variable: String,
        secret: String,
        message: String,
    },

    /// A single fetch attempt failed
    #[error("failed to resolve secret '{reference}': {message}")]
    SecretResolution {
        reference: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Rendering a value template failed
    #[error("failed to format value of '{variable}' with template: {message}")]
    Template { variable: String, message: String },

    /// Target program could not be found on the search path
    #[error("could not find program {program} on path: {message}")]
    ExecutableNotFound { program: String, message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Credential acquisition errors
    #[error("failed to get credentials: {message}")]
    Credentials { message: String },

    /// Network-related errors
    #[error("network error for '{endpoint}': {message}")]
    Network { endpoint: String, message: String },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let invocation = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{invocation}' failed with exit code {code}: {message}"),
        None => format!("command '{invocation}' failed: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = Error::command_execution("gcloud", vec![], "not found", None);
        assert_eq!(err.to_string(), "command 'gcloud' failed: not found");

        let err = Error::command_execution(
            "gcloud",
            vec!["auth".to_string(), "print-access-token".to_string()],
            "no active account",
            Some(1),
        );
        assert_eq!(
            err.to_string(),
            "command 'gcloud auth print-access-token' failed with exit code 1: no active account"
        );
    }

    #[test]
    fn test_unavailable_names_the_reference() {
        let err = Error::secret_unavailable(
            "DB_PASSWORD",
            "projects/p/secrets/db/versions/latest",
            "no default value available",
        );
        let message = err.to_string();
        assert!(message.contains("DB_PASSWORD"));
        assert!(message.contains("projects/p/secrets/db/versions/latest"));
    }

    #[test]
    fn test_malformed_reference_names_the_path() {
        let err = Error::malformed_reference("a/b/c/d");
        assert_eq!(err.to_string(), "invalid secret name specification: a/b/c/d");
    }
}
