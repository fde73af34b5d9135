// Builders for the various client structs for Docker/Kube/HTTP.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use bollard;
use kube;
use simplelog::*;

use crate::configparser::config;

//
// Docker stuff
//
pub async fn docker() -> Result<bollard::Docker> {
    debug!("connecting to docker...");
    let client = bollard::Docker::connect_with_defaults()?;
    client
        .ping()
        .await
        // truncate error chain with new error (returned error is way too verbose)
        .map_err(|_| anyhow!("could not talk to Docker daemon (is DOCKER_HOST correct?)"))?;

    Ok(client)
}

//
// Kubernetes stuff
//

/// Returns Kubernetes Client for the homelab cluster.
///
/// k3d merges the cluster it creates into the default kubeconfig under the
/// `k3d-<name>` context, so that context is used unless the config names
/// another one (or another kubeconfig file entirely).
pub async fn kube_client(config: &config::HomelabConfig) -> Result<kube::Client> {
    debug!("building kube client");

    let options = kube::config::KubeConfigOptions {
        context: Some(config.kube_context()),
        cluster: None,
        user: None,
    };

    let client_config = match &config.kubeconfig {
        Some(kc_path) => {
            let kc = kube::config::Kubeconfig::read_from(kc_path)?;
            kube::Config::from_custom_kubeconfig(kc, &options).await?
        }
        None => kube::Config::from_kubeconfig(&options).await?,
    };

    let client = kube::Client::try_from(client_config)?;
    Ok(client)
}

//
// HTTP stuff
//

/// Plain HTTP client for the ingress endpoint probes, with a bounded
/// per-request timeout so a wedged endpoint cannot stall a check run.
pub fn http_client(config: &config::HomelabConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeouts.http_request_secs))
        .build()
        .context("could not build http client")
}
