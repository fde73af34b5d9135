// Flux installation, repository bootstrap, and reconciliation triggers.

pub mod stages;

use anyhow::{Context, Result};
use kube::Client;
use simplelog::*;

use crate::configparser::config::HomelabConfig;
use crate::exec;
use crate::kube_util;

pub const FLUX_NAMESPACE: &str = "flux-system";

/// Kustomization objects the cluster path defines, in dependency order.
/// These names are what `flux reconcile kustomization <name>` targets.
pub const STAGE_KUSTOMIZATIONS: [&str; 2] = ["infrastructure", "apps"];

/// Base args plus the cluster-targeting flags, so every flux invocation hits
/// the same cluster the kube client probes rather than the ambient
/// current-context.
pub fn flux_args(config: &HomelabConfig, base: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = base.iter().map(|arg| arg.to_string()).collect();
    args.extend(config.cluster_flags());
    args
}

pub async fn preflight(config: &HomelabConfig) -> Result<()> {
    let args = flux_args(config, &["check", "--pre"]);
    exec::run_streaming("flux", &exec::argv(&args))
        .await
        .context("flux preflight check failed")
}

/// Install the Flux controllers unless the flux-system namespace already
/// exists, in which case a previous install is assumed and kept.
/// `flux install --wait` blocks until the controllers are ready.
pub async fn install(client: &Client, config: &HomelabConfig) -> Result<()> {
    if kube_util::namespace_exists(client, FLUX_NAMESPACE).await? {
        info!("flux is already installed, skipping");
        return Ok(());
    }

    preflight(config).await?;

    info!("installing flux controllers...");
    let args = flux_args(config, &["install", "--wait"]);
    exec::run_streaming("flux", &exec::argv(&args))
        .await
        .context("flux install failed")?;

    info!("<green>flux installed</>");
    Ok(())
}

/// The `flux bootstrap github` arguments for this config, shared between
/// actually running the bootstrap and printing the manual fallback command.
pub fn bootstrap_args(config: &HomelabConfig, owner: &str) -> Vec<String> {
    vec![
        "bootstrap".to_string(),
        "github".to_string(),
        format!("--owner={owner}"),
        format!("--repository={}", config.repo_name),
        format!("--branch={}", config.repo_branch),
        format!("--path={}", config.manifests.cluster_path),
        "--personal".to_string(),
        "--read-write-key".to_string(),
    ]
}

/// Bind Flux to the GitHub repository, gated on credentials being present.
/// Without credentials this degrades to printing the exact command to run
/// manually and returns Ok(false). Failures from the bootstrap itself
/// propagate; there is no retry.
pub async fn bootstrap_github(config: &HomelabConfig) -> Result<bool> {
    let Some((owner, token)) = config.github_credentials() else {
        warn!("GITHUB_USER/GITHUB_TOKEN not set, skipping repository bootstrap");
        let mut manual = bootstrap_args(config, "<github-user>");
        manual.extend(config.cluster_flags());
        info!("to bind flux to your fork later, run:");
        info!("  GITHUB_TOKEN=<token> flux {}", manual.join(" "));
        return Ok(false);
    };

    info!(
        "bootstrapping flux against github.com/{owner}/{}...",
        config.repo_name
    );

    let mut args = bootstrap_args(config, owner);
    args.extend(config.cluster_flags());

    // token goes through the environment, never the command line
    exec::run_streaming_with_env("flux", &exec::argv(&args), &[("GITHUB_TOKEN", token)])
        .await
        .context("flux bootstrap failed")?;

    info!("<green>flux bootstrapped</>");
    Ok(true)
}

/// Ask Flux to re-pull the git source and re-apply the stage kustomizations.
pub async fn reconcile(config: &HomelabConfig) -> Result<()> {
    info!("reconciling git source...");
    let args = flux_args(config, &["reconcile", "source", "git", "flux-system"]);
    exec::run_streaming("flux", &exec::argv(&args)).await?;

    for name in STAGE_KUSTOMIZATIONS {
        info!("reconciling kustomization <bold>{name}</>...");
        let args = flux_args(config, &["reconcile", "kustomization", name]);
        exec::run_streaming("flux", &exec::argv(&args)).await?;
    }

    info!("<green>reconciliation triggered</>");
    Ok(())
}
