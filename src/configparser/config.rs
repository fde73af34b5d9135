use anyhow::{Context, Result};
use fully_pub::fully_pub;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use simplelog::*;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

pub const CONFIG_FILE: &str = "phoenixctl.yaml";

/// Environment variables the kit reads, mapped 1:1 onto top-level config keys.
/// These names predate this tool (CLUSTER_NAME etc.), so they are consumed
/// raw instead of under a prefix.
const ENV_KEYS: [&str; 12] = [
    "cluster_name",
    "domain_suffix",
    "github_user",
    "github_token",
    "repo_name",
    "docker_username",
    "docker_password",
    "image_name",
    "tag",
    "namespace",
    "kubeconfig",
    "kubecontext",
];

pub fn parse() -> Result<HomelabConfig> {
    debug!("loading configuration");

    let env_overrides = Env::raw().only(&ENV_KEYS);
    trace!(
        "overriding config with envvars: {}",
        env_overrides.iter().map(|(key, _)| key.string).join(", ")
    );

    let config = Figment::from(Serialized::defaults(HomelabConfig::default()))
        .merge(Yaml::file(CONFIG_FILE))
        .merge(env_overrides)
        .extract()
        .with_context(|| format!("failed to load configuration from {CONFIG_FILE}/environment"))?;

    trace!("got config: {config:#?}");

    Ok(config)
}

//
// ==== Config structs ====
//

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[fully_pub]
struct HomelabConfig {
    cluster_name: String,
    domain_suffix: String,
    repo_name: String,
    repo_branch: String,
    github_user: Option<String>,
    github_token: Option<String>,
    docker_username: Option<String>,
    docker_password: Option<String>,
    image_name: String,
    tag: String,
    namespace: String,
    kubeconfig: Option<String>,
    kubecontext: Option<String>,
    agents: u32,
    manifests: ManifestPaths,
    ports: PortMap,
    timeouts: Timeouts,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[fully_pub]
struct ManifestPaths {
    root: String,
    cluster_path: String,
}

/// Host ports the k3d load balancer forwards to the cluster's 80/443/9090.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[fully_pub]
struct PortMap {
    http: u16,
    https: u16,
    metrics: u16,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[fully_pub]
struct Timeouts {
    namespace_ready_secs: u64,
    crd_wait_secs: u64,
    http_request_secs: u64,
    probe_attempts: u32,
    probe_delay_secs: u64,
}

impl Default for HomelabConfig {
    fn default() -> Self {
        HomelabConfig {
            cluster_name: "phoenix-cluster".to_string(),
            domain_suffix: "local".to_string(),
            repo_name: "phoenix-gitops-homelab".to_string(),
            repo_branch: "main".to_string(),
            github_user: None,
            github_token: None,
            docker_username: None,
            docker_password: None,
            image_name: "phoenix-app".to_string(),
            tag: "latest".to_string(),
            namespace: "phoenix-app".to_string(),
            kubeconfig: None,
            kubecontext: None,
            agents: 2,
            manifests: ManifestPaths {
                root: "kubernetes".to_string(),
                cluster_path: "./kubernetes/clusters/local".to_string(),
            },
            ports: PortMap {
                http: 8080,
                https: 8443,
                metrics: 9090,
            },
            timeouts: Timeouts {
                namespace_ready_secs: 300,
                crd_wait_secs: 300,
                http_request_secs: 10,
                probe_attempts: 5,
                probe_delay_secs: 10,
            },
        }
    }
}

impl HomelabConfig {
    /// Context name k3d writes into the kubeconfig, unless overridden.
    pub fn kube_context(&self) -> String {
        self.kubecontext
            .clone()
            .unwrap_or_else(|| format!("k3d-{}", self.cluster_name))
    }

    /// Flags pinning kubectl/flux invocations to the same cluster the kube
    /// client talks to, instead of whatever the ambient current-context is.
    pub fn cluster_flags(&self) -> Vec<String> {
        let mut flags = vec!["--context".to_string(), self.kube_context()];
        if let Some(path) = &self.kubeconfig {
            flags.push("--kubeconfig".to_string());
            flags.push(path.clone());
        }
        flags
    }

    /// Both credentials present and non-empty; gates the GitOps repo bootstrap.
    pub fn github_credentials(&self) -> Option<(&str, &str)> {
        match (self.github_user.as_deref(), self.github_token.as_deref()) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => {
                Some((user, token))
            }
            _ => None,
        }
    }
}
