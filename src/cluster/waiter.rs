// Tolerant per-namespace readiness waiting.
//
// A namespace that never settles is a warning, not a failure: a homelab
// bootstrap should not abort because one optional component is slow. The
// caller gets structured outcomes and decides how to present them.

use std::time::Duration;

use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};
use simplelog::*;
use tokio::time::{sleep, Instant};

use crate::configparser::config::HomelabConfig;
use crate::kube_util::POLL_INTERVAL;

/// Namespaces the platform manifests populate, in apply order. The
/// application namespace is configurable and appended separately.
pub const PLATFORM_NAMESPACES: [&str; 5] = [
    "flux-system",
    "ingress-nginx",
    "cnpg-system",
    "database",
    "monitoring",
];

pub fn workload_namespaces(config: &HomelabConfig) -> Vec<String> {
    let mut namespaces: Vec<String> = PLATFORM_NAMESPACES
        .iter()
        .map(|ns| ns.to_string())
        .collect();
    if !namespaces.contains(&config.namespace) {
        namespaces.push(config.namespace.clone());
    }
    namespaces
}

#[derive(Debug, PartialEq)]
pub enum WaitOutcome {
    Ready,
    TimedOut { pending: Vec<String> },
}

#[derive(Debug)]
pub struct NamespaceWait {
    pub namespace: String,
    pub outcome: WaitOutcome,
}

impl NamespaceWait {
    pub fn is_ready(&self) -> bool {
        self.outcome == WaitOutcome::Ready
    }
}

/// Wait for each workload namespace in turn, logging progress. Timeouts are
/// downgraded to warnings; this never returns an error for unready pods.
pub async fn wait_for_namespaces(
    client: &Client,
    config: &HomelabConfig,
) -> Vec<NamespaceWait> {
    let timeout = Duration::from_secs(config.timeouts.namespace_ready_secs);
    let mut results = vec![];

    for namespace in workload_namespaces(config) {
        info!("waiting for pods in <bold>{namespace}</>...");
        let outcome = wait_for_namespace(client, &namespace, timeout).await;

        match &outcome {
            WaitOutcome::Ready => info!("<green>{namespace} ready</>"),
            WaitOutcome::TimedOut { pending } => warn!(
                "{namespace} not ready after {}s (pending: {}), continuing anyway",
                timeout.as_secs(),
                pending.join(", ")
            ),
        }

        results.push(NamespaceWait {
            namespace,
            outcome,
        });
    }

    results
}

/// Where a namespace's pods stand right now.
#[derive(Debug, PartialEq)]
pub enum PodsState {
    AllSettled,
    /// Nothing scheduled yet. Not the same as ready: right after the stages
    /// apply, Flux and Helm have not created the workloads, and reporting
    /// "ready" on an empty namespace would be vacuous.
    NoPods,
    Pending(Vec<String>),
}

pub fn classify_pods(pods: &[Pod]) -> PodsState {
    if pods.is_empty() {
        return PodsState::NoPods;
    }

    let pending: Vec<String> = pods
        .iter()
        .filter(|pod| !pod_settled(pod))
        .map(|pod| pod.name_any())
        .collect();

    if pending.is_empty() {
        PodsState::AllSettled
    } else {
        PodsState::Pending(pending)
    }
}

/// Poll one namespace until every pod settles or the timeout elapses.
/// Transient API errors keep the poll going rather than aborting the wait.
async fn wait_for_namespace(client: &Client, namespace: &str, timeout: Duration) -> WaitOutcome {
    let deadline = Instant::now() + timeout;
    let mut last_pending: Vec<String> = vec![];

    loop {
        match list_pods(client, namespace).await {
            Ok(pods) => match classify_pods(&pods) {
                PodsState::AllSettled => return WaitOutcome::Ready,
                PodsState::NoPods => {
                    trace!("{namespace}: no pods created yet");
                    last_pending = vec!["<no pods created yet>".to_string()];
                }
                PodsState::Pending(pending) => {
                    trace!("{namespace}: {} pod(s) pending", pending.len());
                    last_pending = pending;
                }
            },
            Err(e) => {
                debug!("pod query for {namespace} failed, retrying: {e:#}");
                last_pending = vec![format!("<query failed: {e:#}>")];
            }
        }

        if Instant::now() >= deadline {
            return WaitOutcome::TimedOut {
                pending: last_pending,
            };
        }
        sleep(POLL_INTERVAL).await;
    }
}

async fn list_pods(client: &Client, namespace: &str) -> Result<Vec<Pod>> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    Ok(pods.list(&ListParams::default()).await?.items)
}

/// Completed pods count as settled; everything else needs the Ready condition.
fn pod_settled(pod: &Pod) -> bool {
    let Some(status) = &pod.status else {
        return false;
    };

    if status.phase.as_deref() == Some("Succeeded") {
        return true;
    }

    status
        .conditions
        .iter()
        .flatten()
        .any(|c| c.type_ == "Ready" && c.status == "True")
}
