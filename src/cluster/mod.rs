// k3d cluster lifecycle. Creation and deletion are both guarded by the
// cluster list, so repeat invocations are no-ops.

pub mod hosts;
pub mod waiter;

use anyhow::{Context, Result};
use k8s_openapi::serde_json;
use serde::Deserialize;
use simplelog::*;

use crate::configparser::config::HomelabConfig;
use crate::exec;

#[derive(Debug, Deserialize)]
struct K3dCluster {
    name: String,
}

pub async fn cluster_exists(name: &str) -> Result<bool> {
    let stdout = exec::run_capture("k3d", &["cluster", "list", "--output", "json"]).await?;

    let clusters: Vec<K3dCluster> =
        serde_json::from_str(&stdout).context("could not parse k3d cluster list output")?;

    Ok(clusters.iter().any(|cluster| cluster.name == name))
}

/// Create the cluster with the fixed homelab topology: a loadbalancer
/// forwarding the configured host ports to 80/443/9090, traefik disabled
/// (ingress-nginx is deployed instead), two agents, blocking on k3d's own
/// readiness wait.
pub async fn create_cluster(config: &HomelabConfig) -> Result<()> {
    info!("creating k3d cluster <bold>{}</>...", config.cluster_name);

    let http = format!("{}:80@loadbalancer", config.ports.http);
    let https = format!("{}:443@loadbalancer", config.ports.https);
    let metrics = format!("{}:9090@loadbalancer", config.ports.metrics);
    let agents = config.agents.to_string();

    exec::run_streaming(
        "k3d",
        &[
            "cluster",
            "create",
            &config.cluster_name,
            "--port",
            &http,
            "--port",
            &https,
            "--port",
            &metrics,
            "--k3s-arg",
            "--disable=traefik@server:*",
            "--agents",
            &agents,
            "--wait",
        ],
    )
    .await
    .context("k3d cluster create failed")?;

    info!("cluster <bold>{}</> created", config.cluster_name);
    Ok(())
}

/// Create the cluster unless one of this name already exists.
/// Returns whether this call created it.
pub async fn ensure_cluster(config: &HomelabConfig) -> Result<bool> {
    if cluster_exists(&config.cluster_name).await? {
        info!(
            "cluster <bold>{}</> already exists, skipping creation",
            config.cluster_name
        );
        return Ok(false);
    }

    create_cluster(config).await?;
    Ok(true)
}

/// Delete the named cluster if it exists; no-op (and success) otherwise.
pub async fn delete_cluster(name: &str) -> Result<()> {
    if !cluster_exists(name).await? {
        info!("cluster <bold>{name}</> not found, nothing to delete");
        return Ok(());
    }

    info!("deleting k3d cluster <bold>{name}</>...");
    exec::run_streaming("k3d", &["cluster", "delete", name])
        .await
        .context("k3d cluster delete failed")?;

    info!("cluster <bold>{name}</> deleted");
    Ok(())
}
