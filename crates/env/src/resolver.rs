//! Secret name resolution
//!
//! Partial paths are qualified strictly by segment count:
//!
//! | path                  | project | secret | version  |
//! |-----------------------|---------|--------|----------|
//! | `s`                   | ambient | `s`    | `latest` |
//! | `s/42`, `s/latest`    | ambient | `s`    | `42`     |
//! | `p/s`                 | `p`     | `s`    | `latest` |
//! | `p/s/v`               | `p`     | `s`    | `v`      |
//!
//! The two-segment form is ambiguous for secrets named with only digits or
//! `latest`: `p/123` always reads as secret `p`, version `123`.

use gsmenv_core::{constants::LATEST_VERSION, Error, Result, SecretName};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VERSION_SEGMENT: Regex = Regex::new(r"^([0-9]+|latest)$").unwrap();
}

/// Qualify `path` into a full secret version name.
///
/// One leading `/` is ignored and already-qualified names are returned
/// unchanged. `project` is only consulted for shapes that omit it.
pub fn resolve_secret_name(path: &str, project: Option<&str>) -> Result<SecretName> {
    let path = path.strip_prefix('/').unwrap_or(path);

    let segments: Vec<&str> = path.split('/').collect();
    if segments
        .iter()
        .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
    {
        return Err(Error::malformed_reference(path));
    }

    if let Some(name) = SecretName::parse_canonical(path) {
        return Ok(name);
    }

    let ambient = || {
        project
            .filter(|project| !project.is_empty())
            .ok_or_else(|| Error::configuration("no project specified and no default project set"))
    };

    let name = match segments.as_slice() {
        [secret] => SecretName::new(ambient()?, *secret, LATEST_VERSION),
        [secret, version] if VERSION_SEGMENT.is_match(version) => {
            SecretName::new(ambient()?, *secret, *version)
        }
        [project, secret] => SecretName::new(*project, *secret, LATEST_VERSION),
        [project, secret, version] => SecretName::new(*project, *secret, *version),
        _ => return Err(Error::malformed_reference(path)),
    };

    tracing::debug!(secret = %name, "resolved secret name");
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: Option<&str> = Some("ambient");

    fn resolve(path: &str) -> String {
        resolve_secret_name(path, PROJECT).unwrap().to_string()
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(
            resolve("/db-password"),
            "projects/ambient/secrets/db-password/versions/latest"
        );
        assert_eq!(
            resolve("db-password"),
            "projects/ambient/secrets/db-password/versions/latest"
        );
    }

    #[test]
    fn test_secret_and_version() {
        assert_eq!(resolve("/a/42"), "projects/ambient/secrets/a/versions/42");
        assert_eq!(
            resolve("/a/latest"),
            "projects/ambient/secrets/a/versions/latest"
        );
    }

    #[test]
    fn test_project_and_secret() {
        assert_eq!(resolve("/a/b"), "projects/a/secrets/b/versions/latest");
        assert_eq!(
            resolve("/a/v42"),
            "projects/a/secrets/v42/versions/latest"
        );
    }

    #[test]
    fn test_fully_explicit() {
        assert_eq!(resolve("/p/s/3"), "projects/p/secrets/s/versions/3");
        assert_eq!(
            resolve_secret_name("/p/s/3", None).unwrap().to_string(),
            "projects/p/secrets/s/versions/3"
        );
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let canonical = "projects/p/secrets/s/versions/7";
        assert_eq!(resolve(canonical), canonical);
        assert_eq!(resolve(&format!("/{canonical}")), canonical);

        let resolved = resolve("/a/b");
        assert_eq!(resolve(&resolved), resolved);
    }

    #[test]
    fn test_too_many_segments() {
        for path in ["/a/b/c/d", "/a/b/c/d/e", "projects/p/secrets/s/versions/1/x"] {
            let err = resolve_secret_name(path, PROJECT).unwrap_err();
            assert!(
                matches!(err, Error::MalformedReference { .. }),
                "{path}: {err}"
            );
        }
    }

    #[test]
    fn test_empty_segments() {
        for path in ["", "/", "/a//b", "/a/"] {
            let err = resolve_secret_name(path, PROJECT).unwrap_err();
            assert!(
                matches!(err, Error::MalformedReference { .. }),
                "{path:?}: {err}"
            );
        }
    }

    #[test]
    fn test_dot_segments() {
        for path in ["/a/../b", "/./db", "/p/s/..", "projects/p/secrets/../versions/1"] {
            let err = resolve_secret_name(path, PROJECT).unwrap_err();
            assert!(
                matches!(err, Error::MalformedReference { .. }),
                "{path}: {err}"
            );
        }
        assert_eq!(resolve("/a.b/c.d"), "projects/a.b/secrets/c.d/versions/latest");
    }

    #[test]
    fn test_missing_ambient_project() {
        let err = resolve_secret_name("/db", None).unwrap_err();
        assert!(err.to_string().contains("no project specified"));
        assert!(resolve_secret_name("/db/1", Some("")).is_err());
        assert!(resolve_secret_name("/p/db", None).is_ok());
    }

    // Known-ambiguous: a project/secret pair whose secret is all digits or
    // `latest` reads as secret/version.
    #[test]
    fn test_numeric_secret_reads_as_version() {
        assert_eq!(
            resolve("/my-project/123"),
            "projects/ambient/secrets/my-project/versions/123"
        );
        assert_eq!(
            resolve("/my-project/latest"),
            "projects/ambient/secrets/my-project/versions/latest"
        );
    }
}
