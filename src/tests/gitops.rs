#[cfg(test)]
use pretty_assertions::assert_eq;

use crate::cluster::waiter::workload_namespaces;
use crate::configparser::config::HomelabConfig;
use crate::gitops::{bootstrap_args, flux_args, stages};

/// The manual-fallback message and the real bootstrap share this argument
/// list, so it has to carry the full contract.
#[test]
fn bootstrap_args_carry_repo_contract() {
    let config = HomelabConfig::default();
    let args = bootstrap_args(&config, "octocat");

    assert_eq!(
        args,
        vec![
            "bootstrap",
            "github",
            "--owner=octocat",
            "--repository=phoenix-gitops-homelab",
            "--branch=main",
            "--path=./kubernetes/clusters/local",
            "--personal",
            "--read-write-key",
        ]
    );
}

/// Every flux invocation targets the configured cluster explicitly; a
/// switched ambient current-context must never receive the install.
#[test]
fn flux_invocations_target_configured_cluster() {
    let mut config = HomelabConfig::default();

    assert_eq!(
        flux_args(&config, &["install", "--wait"]),
        vec!["install", "--wait", "--context", "k3d-phoenix-cluster"]
    );

    config.kubeconfig = Some("/tmp/kubeconfig".to_string());
    let args = flux_args(&config, &["check", "--pre"]);
    assert!(args.contains(&"--kubeconfig".to_string()));
    assert!(args.contains(&"/tmp/kubeconfig".to_string()));
}

/// Namespaces before operators, operators before the resources that need
/// their CRDs.
#[test]
fn stages_declare_dependency_order() {
    let names: Vec<&str> = stages::STAGES.iter().map(|stage| stage.name).collect();
    assert_eq!(names, vec!["bootstrap", "infrastructure", "apps"]);

    assert!(stages::STAGES[0].required_crds.is_empty());
    assert!(stages::STAGES[1]
        .required_crds
        .contains(&"kustomizations.kustomize.toolkit.fluxcd.io"));
    assert!(stages::STAGES[2]
        .required_crds
        .contains(&"clusters.postgresql.cnpg.io"));
}

#[test]
fn stage_dirs_live_under_manifest_root() {
    let mut config = HomelabConfig::default();
    config.manifests.root = "deploy".to_string();

    let dir = stages::stage_dir(&config, &stages::STAGES[1]);
    assert_eq!(dir.to_string_lossy(), "deploy/infrastructure");
}

/// The application namespace is waited on too, without duplicating a
/// platform namespace it happens to match.
#[test]
fn waiter_includes_app_namespace_once() {
    let mut config = HomelabConfig::default();
    let namespaces = workload_namespaces(&config);
    assert_eq!(namespaces.len(), 6);
    assert!(namespaces.contains(&"phoenix-app".to_string()));

    config.namespace = "monitoring".to_string();
    let namespaces = workload_namespaces(&config);
    assert_eq!(namespaces.len(), 5);
}
