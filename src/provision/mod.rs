// The bootstrap pipeline and its scoped rollback.
//
// Undo steps are registered only as resources begin being created, and run in
// reverse order if a later phase fails. Once the manifest stages have applied,
// the remaining phases (readiness waiting, health report, access info) are
// observational and never destroy state. Read-only modes never touch the
// rollback at all.

use std::path::Path;

use anyhow::{Context, Result};
use simplelog::*;

use crate::checks;
use crate::clients;
use crate::cluster;
use crate::cluster::hosts;
use crate::configparser::config::HomelabConfig;
use crate::gitops;
use crate::tools;

enum UndoStep {
    DeleteCluster(String),
    RemoveAliases(Vec<String>),
}

#[derive(Default)]
pub struct Rollback {
    steps: Vec<UndoStep>,
}

impl Rollback {
    fn register(&mut self, step: UndoStep) {
        self.steps.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Undo registered steps in reverse order. Errors are logged, not
    /// propagated; the original pipeline error is what the user needs to see.
    pub async fn run(self) {
        for step in self.steps.into_iter().rev() {
            match step {
                UndoStep::DeleteCluster(name) => {
                    warn!("rolling back: deleting cluster <bold>{name}</>");
                    if let Err(e) = cluster::delete_cluster(&name).await {
                        error!("rollback of cluster {name} failed: {e:#}");
                    }
                }
                UndoStep::RemoveAliases(lines) => {
                    warn!("rolling back: removing {} hosts alias(es)", lines.len());
                    if let Err(e) = hosts::remove_aliases(Path::new(hosts::HOSTS_PATH), &lines) {
                        error!("rollback of hosts aliases failed: {e:#}");
                    }
                }
            }
        }
    }
}

/// Run the full bootstrap: prerequisites, cluster, hosts aliases, Flux,
/// manifest stages, then the observational tail.
pub async fn bootstrap(config: &HomelabConfig, keep_on_failure: bool) -> Result<()> {
    tools::verify_required().await?;

    if config.github_credentials().is_none() {
        warn!("GITHUB_USER/GITHUB_TOKEN not set; flux will be installed but not bound to a repository");
    }

    let mut rollback = Rollback::default();

    if let Err(e) = provision(config, &mut rollback).await {
        if keep_on_failure || rollback.is_empty() {
            if !rollback.is_empty() {
                warn!("bootstrap failed; keeping partially created resources (--keep-on-failure)");
            }
        } else {
            error!("bootstrap failed, rolling back what this run created");
            rollback.run().await;
        }
        return Err(e);
    }

    // everything below only observes; a failure here must not delete the
    // cluster that was just successfully provisioned
    observe(config).await
}

/// The mutating phases, in order. Each undo step is registered right before
/// its resource starts being created.
async fn provision(config: &HomelabConfig, rollback: &mut Rollback) -> Result<()> {
    if cluster::cluster_exists(&config.cluster_name).await? {
        info!(
            "cluster <bold>{}</> already exists, skipping creation",
            config.cluster_name
        );
    } else {
        rollback.register(UndoStep::DeleteCluster(config.cluster_name.clone()));
        cluster::create_cluster(config).await?;
    }

    add_hosts_aliases(config, rollback);

    let client = clients::kube_client(config)
        .await
        .context("could not connect to the new cluster")?;

    gitops::install(&client, config).await?;
    gitops::bootstrap_github(config).await?;

    gitops::stages::apply_all(&client, config).await?;

    Ok(())
}

/// Hosts aliases are best-effort: without root the edit fails, and the user
/// gets the lines to add themselves instead of a dead pipeline.
fn add_hosts_aliases(config: &HomelabConfig, rollback: &mut Rollback) {
    match hosts::add_aliases(Path::new(hosts::HOSTS_PATH), config) {
        Ok(added) if added.is_empty() => (),
        Ok(added) => rollback.register(UndoStep::RemoveAliases(added)),
        Err(e) => {
            warn!("could not update {} ({e:#})", hosts::HOSTS_PATH);
            info!("add these lines yourself (requires root):");
            for hostname in hosts::service_hostnames(config) {
                info!("  {}", hosts::alias_line(&hostname));
            }
        }
    }
}

/// Wait for workloads, report health, print access info. Never mutates.
async fn observe(config: &HomelabConfig) -> Result<()> {
    let client = clients::kube_client(config).await?;

    cluster::waiter::wait_for_namespaces(&client, config).await;

    let report = checks::health_report(config).await?;
    report.print();
    if !report.all_passed() {
        warn!("some health checks failed; the stack may still be converging (rerun `phoenixctl health` later)");
    }

    print_access_info(config);
    Ok(())
}

pub fn print_access_info(config: &HomelabConfig) {
    let suffix = &config.domain_suffix;
    let port = config.ports.http;

    info!("<green><bold>bootstrap complete!</></>");
    info!("  application: http://phoenix.{suffix}:{port}");
    info!("  grafana:     http://grafana.{suffix}:{port}");
    info!("  prometheus:  http://prometheus.{suffix}:{port}");
    info!("check on the stack with `phoenixctl status` or `phoenixctl health`");
}

/// Teardown: delete the cluster (no-op if absent) and remove managed hosts
/// aliases, downgrading removal failures to warnings.
pub async fn cleanup(config: &HomelabConfig) -> Result<()> {
    cluster::delete_cluster(&config.cluster_name).await?;

    match hosts::remove_managed(Path::new(hosts::HOSTS_PATH)) {
        Ok(0) => debug!("no managed hosts aliases to remove"),
        Ok(removed) => info!("removed {removed} managed hosts alias(es)"),
        Err(e) => warn!(
            "could not remove hosts aliases from {} ({e:#}); remove lines marked `{}` yourself",
            hosts::HOSTS_PATH,
            hosts::MANAGED_MARKER
        ),
    }

    info!("<green>cleanup complete</>");
    Ok(())
}
