// End-to-end tests driving the built binary: argument handling and the
// init -> validate roundtrip. Nothing here needs a cluster.

use std::process::{Command, Output};

use tempfile::TempDir;

const ENV_VARS: [&str; 10] = [
    "CLUSTER_NAME",
    "DOMAIN_SUFFIX",
    "GITHUB_USER",
    "GITHUB_TOKEN",
    "REPO_NAME",
    "DOCKER_USERNAME",
    "DOCKER_PASSWORD",
    "IMAGE_NAME",
    "TAG",
    "NAMESPACE",
];

fn phoenixctl(args: &[&str], dir: &TempDir) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_phoenixctl"));
    command.args(args).current_dir(dir.path());
    // keep the host environment out of config parsing
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command.output().unwrap()
}

/// An unknown mode token prints usage and exits non-zero without doing
/// anything.
#[test]
fn unknown_subcommand_prints_usage() {
    let dir = TempDir::new().unwrap();
    let output = phoenixctl(&["teardown"], &dir);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "no usage in stderr: {stderr}");

    // no mutation: the scaffold directory was not created
    assert!(!dir.path().join("kubernetes").exists());
}

#[test]
fn help_succeeds() {
    let dir = TempDir::new().unwrap();
    let output = phoenixctl(&["--help"], &dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bootstrap"));
    assert!(stdout.contains("cleanup"));
}

/// validate with no manifest tree fails and names the missing root.
#[test]
fn validate_fails_without_manifests() {
    let dir = TempDir::new().unwrap();
    let output = phoenixctl(&["validate"], &dir);

    assert!(!output.status.success());
}

/// init writes a parseable manifest tree that validate accepts, and a second
/// init does not overwrite it.
#[test]
fn init_then_validate_roundtrip() {
    let dir = TempDir::new().unwrap();

    let init = phoenixctl(&["init"], &dir);
    assert!(
        init.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&init.stderr)
    );

    for path in [
        "kubernetes/bootstrap/kustomization.yaml",
        "kubernetes/infrastructure/kustomization.yaml",
        "kubernetes/apps/kustomization.yaml",
        "kubernetes/clusters/local/stages.yaml",
    ] {
        assert!(dir.path().join(path).is_file(), "missing {path}");
    }

    let validate = phoenixctl(&["validate"], &dir);
    assert!(
        validate.status.success(),
        "validate failed: {}",
        String::from_utf8_lossy(&validate.stderr)
    );

    // rerunning init must leave hand-edited files alone
    let marker = dir.path().join("kubernetes/apps/database.yaml");
    std::fs::write(&marker, "# edited\n").unwrap();

    let again = phoenixctl(&["init"], &dir);
    assert!(again.status.success());
    assert_eq!(std::fs::read_to_string(&marker).unwrap(), "# edited\n");
}
