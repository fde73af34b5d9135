use figment::Jail;

#[cfg(test)]
use pretty_assertions::assert_eq;

use crate::configparser::config::*;

/// No file and no environment gives the documented defaults.
#[test]
fn defaults_only() {
    Jail::expect_with(|jail| {
        jail.clear_env();

        let config = match parse() {
            Ok(c) => Ok(c),
            // figment::Error cannot coerce from anyhow::Error natively
            Err(e) => Err(figment::Error::from(format!("{:?}", e))),
        }?;

        assert_eq!(config, HomelabConfig::default());
        assert_eq!(config.cluster_name, "phoenix-cluster");
        assert_eq!(config.domain_suffix, "local");
        assert_eq!(config.repo_name, "phoenix-gitops-homelab");
        assert_eq!(config.namespace, "phoenix-app");
        assert_eq!(config.agents, 2);
        assert_eq!(config.ports.http, 8080);
        assert_eq!(config.timeouts.namespace_ready_secs, 300);

        Ok(())
    });
}

/// Values from phoenixctl.yaml override the defaults, including nested keys
/// the environment contract does not cover.
#[test]
fn yaml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "phoenixctl.yaml",
            r#"
                cluster_name: testlab
                domain_suffix: lab.example
                agents: 1

                ports:
                    http: 9080
                    https: 9443
                    metrics: 9999

                timeouts:
                    namespace_ready_secs: 60
                    crd_wait_secs: 60
                    http_request_secs: 5
                    probe_attempts: 2
                    probe_delay_secs: 1
            "#,
        )?;

        let config = match parse() {
            Ok(c) => Ok(c),
            Err(e) => Err(figment::Error::from(format!("{:?}", e))),
        }?;

        assert_eq!(config.cluster_name, "testlab");
        assert_eq!(config.domain_suffix, "lab.example");
        assert_eq!(config.agents, 1);
        assert_eq!(config.ports.http, 9080);
        assert_eq!(config.timeouts.probe_attempts, 2);
        // untouched keys keep their defaults
        assert_eq!(config.repo_name, "phoenix-gitops-homelab");
        assert_eq!(config.tag, "latest");

        Ok(())
    });
}

/// The raw environment contract wins over both file and defaults.
#[test]
fn env_overrides_yaml() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("phoenixctl.yaml", "cluster_name: from-yaml")?;

        jail.set_env("CLUSTER_NAME", "from-env");
        jail.set_env("GITHUB_USER", "octocat");
        jail.set_env("GITHUB_TOKEN", "hunter2");
        jail.set_env("NAMESPACE", "my-app");

        let config = match parse() {
            Ok(c) => Ok(c),
            Err(e) => Err(figment::Error::from(format!("{:?}", e))),
        }?;

        assert_eq!(config.cluster_name, "from-env");
        assert_eq!(config.namespace, "my-app");
        assert_eq!(config.github_credentials(), Some(("octocat", "hunter2")));

        Ok(())
    });
}

#[test]
fn kube_context_defaults_to_k3d_name() {
    let mut config = HomelabConfig::default();
    assert_eq!(config.kube_context(), "k3d-phoenix-cluster");

    config.kubecontext = Some("elsewhere".to_string());
    assert_eq!(config.kube_context(), "elsewhere");
}

/// External CLI invocations carry the explicit context (and kubeconfig when
/// configured), matching the cluster the kube client talks to.
#[test]
fn cluster_flags_pin_the_cluster() {
    let mut config = HomelabConfig::default();
    assert_eq!(
        config.cluster_flags(),
        vec!["--context", "k3d-phoenix-cluster"]
    );

    config.kubeconfig = Some("/home/me/.kube/lab".to_string());
    config.kubecontext = Some("elsewhere".to_string());
    assert_eq!(
        config.cluster_flags(),
        vec!["--context", "elsewhere", "--kubeconfig", "/home/me/.kube/lab"]
    );
}

/// Repository bootstrap is gated on both credentials being non-empty.
#[test]
fn credential_gating() {
    let mut config = HomelabConfig::default();
    assert_eq!(config.github_credentials(), None);

    config.github_user = Some("octocat".to_string());
    assert_eq!(config.github_credentials(), None);

    config.github_token = Some("".to_string());
    assert_eq!(config.github_credentials(), None);

    config.github_token = Some("hunter2".to_string());
    assert_eq!(config.github_credentials(), Some(("octocat", "hunter2")));
}
