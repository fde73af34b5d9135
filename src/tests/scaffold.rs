use std::fs;

#[cfg(test)]
use pretty_assertions::assert_eq;

use tempfile::TempDir;

use crate::configparser::config::HomelabConfig;
use crate::scaffold;

/// The rendered Flux stage objects point at the configured manifest root,
/// not a hardcoded directory name.
#[test]
fn stage_objects_follow_manifest_root() {
    let dir = TempDir::new().unwrap();
    let mut config = HomelabConfig::default();
    config.manifests.root = "deploy".to_string();

    scaffold::render_repo(dir.path(), &config).unwrap();

    let stages = fs::read_to_string(dir.path().join("deploy/clusters/local/stages.yaml")).unwrap();
    assert!(stages.contains("path: ./deploy/bootstrap"));
    assert!(stages.contains("path: ./deploy/infrastructure"));
    assert!(stages.contains("path: ./deploy/apps"));
    assert!(!stages.contains("./kubernetes/"));
}

#[test]
fn render_writes_all_files_once() {
    let dir = TempDir::new().unwrap();
    let config = HomelabConfig::default();

    let written = scaffold::render_repo(dir.path(), &config).unwrap();
    assert_eq!(written, scaffold::templates::SCAFFOLD_FILES.len());

    // second render skips everything that already exists
    let rewritten = scaffold::render_repo(dir.path(), &config).unwrap();
    assert_eq!(rewritten, 0);
}

#[test]
fn app_manifest_carries_domain_and_image() {
    let dir = TempDir::new().unwrap();
    let mut config = HomelabConfig::default();
    config.domain_suffix = "lab.example".to_string();
    config.docker_username = Some("octocat".to_string());

    scaffold::render_repo(dir.path(), &config).unwrap();

    let app = fs::read_to_string(dir.path().join("kubernetes/apps/phoenix-app.yaml")).unwrap();
    assert!(app.contains("host: phoenix.lab.example"));
    assert!(app.contains("image: octocat/phoenix-app:latest"));
}
