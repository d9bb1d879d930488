use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with credentials and Secret Manager pointed at a closed port,
/// so every fetch fails fast and the fallbacks decide the outcome
fn gsmenv() -> Command {
    let mut cmd = Command::cargo_bin("gsmenv").unwrap();
    cmd.env("GOOGLE_CLOUD_PROJECT", "test-project")
        .env_remove("GOOGLE_APPLICATION_CREDENTIALS")
        .env("CLOUDSDK_CONFIG", "/nonexistent/gsmenv-gcloud-config")
        .env("GCE_METADATA_HOST", "127.0.0.1:1")
        .env("GSMENV_SECRETMANAGER_ENDPOINT", "http://127.0.0.1:1")
        .env_remove("GSMENV_LOG")
        .arg("--use-default-credentials");
    cmd
}

#[test]
fn test_requires_name_or_command() {
    gsmenv()
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected --name or a command to run"));
}

#[test]
fn test_noop_writes_default_to_destination() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("db-password");

    gsmenv()
        .env(
            "DB_PASSWORD",
            format!(
                "gcp:///db-password?default=changeme&destination={}",
                destination.display()
            ),
        )
        .arg("noop")
        .assert()
        .success()
        .stderr(predicate::str::contains("using default value"));

    assert_eq!(std::fs::read_to_string(&destination).unwrap(), "changeme");
}

#[test]
fn test_noop_reuses_existing_destination() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("db-password");
    std::fs::write(&destination, "from last run").unwrap();

    for _ in 0..2 {
        gsmenv()
            .env(
                "DB_PASSWORD",
                format!("gcp:///db-password?destination={}", destination.display()),
            )
            .arg("noop")
            .assert()
            .success()
            .stderr(predicate::str::contains("using existing destination file"));
        assert_eq!(
            std::fs::read_to_string(&destination).unwrap(),
            "from last run"
        );
    }
}

#[test]
fn test_unavailable_secret_is_fatal() {
    gsmenv()
        .env("DB_PASSWORD", "gcp:///db-password")
        .arg("noop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to get secret DB_PASSWORD"));
}

#[cfg(unix)]
#[test]
fn test_unavailable_secret_starts_nothing() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("started");

    gsmenv()
        .env("DB_PASSWORD", "gcp:///db-password")
        .env("MARKER", &marker)
        .args(["sh", "-c", "touch \"$MARKER\""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to get secret DB_PASSWORD"));

    assert!(!marker.exists());
}

#[test]
fn test_dot_segments_are_not_normalized() {
    gsmenv()
        .env("DB_PASSWORD", "gcp:///a/../b?default=changeme")
        .arg("noop")
        .assert()
        .success()
        .stderr(predicate::str::contains("/a/../b"))
        .stderr(predicate::str::contains("secrets/b/versions").not());
}

#[test]
fn test_host_in_reference_is_fatal() {
    gsmenv()
        .env("DB_PASSWORD", "gcp://test-project/db-password")
        .arg("noop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("add a /"));
}

#[test]
fn test_missing_program() {
    gsmenv()
        .arg("gsmenv-no-such-program")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not find program gsmenv-no-such-program",
        ));
}

#[test]
fn test_named_secret_failure() {
    gsmenv()
        .args(["--name", "db-password"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty().not());
}

#[cfg(unix)]
#[test]
fn test_program_sees_resolved_values() {
    gsmenv()
        .env("DB_PASSWORD", "gcp:///db-password?default=changeme")
        .args(["sh", "-c", "printf %s \"$DB_PASSWORD\""])
        .assert()
        .success()
        .stdout("changeme");
}

#[cfg(unix)]
#[test]
fn test_program_sees_destination_path() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("db-password");

    gsmenv()
        .env(
            "DB_PASSWORD",
            format!(
                "gcp:///db-password?default=changeme&destination={}&chmod=0600",
                destination.display()
            ),
        )
        .args(["sh", "-c", "cat \"$DB_PASSWORD\""])
        .assert()
        .success()
        .stdout("changeme");
}

#[cfg(unix)]
#[test]
fn test_exit_status_is_the_programs() {
    gsmenv()
        .args(["sh", "-c", "exit 3"])
        .assert()
        .code(3);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_values_reach_the_program_unchanged() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = gsmenv()
        .env("RAW", OsStr::from_bytes(b"a\xffb"))
        .env("DB_PASSWORD", "gcp:///db-password?default=changeme")
        .args(["sh", "-c", "printf %s \"$RAW\""])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"a\xffb");
}
