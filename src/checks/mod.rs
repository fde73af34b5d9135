// Health and smoke checks over the running stack.
//
// Every probe produces a structured CheckOutcome instead of a log line, so
// callers can count failures and pick an exit code; text formatting happens
// only when a report is printed.

pub mod cluster;
pub mod endpoints;
pub mod reconciliation;
pub mod workloads;

use anyhow::Result;
use simplelog::*;

use crate::clients;
use crate::configparser::config::HomelabConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckOutcome {
    pub fn pass(name: impl Into<String>, detail: impl Into<String>) -> Self {
        CheckOutcome {
            name: name.into(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        CheckOutcome {
            name: name.into(),
            passed: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn push(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Presentation boundary: everything upstream of this is structured.
    pub fn print(&self) {
        for outcome in &self.outcomes {
            if outcome.passed {
                info!(
                    "<green>PASS</> <bold>{}</>: {}",
                    outcome.name, outcome.detail
                );
            } else {
                warn!("<red>FAIL</> <bold>{}</>: {}", outcome.name, outcome.detail);
            }
        }

        info!(
            "checks passed: <green>{}</>, failed: {}",
            self.passed(),
            self.failed()
        );
    }
}

/// Single-shot health checks: cluster, Flux controllers, platform workloads,
/// database, and the ingress endpoints, each probed exactly once.
pub async fn health_report(config: &HomelabConfig) -> Result<CheckReport> {
    let client = clients::kube_client(config).await?;
    let http = clients::http_client(config)?;

    let mut report = CheckReport::default();

    report.push(cluster::api_reachable(&client).await);
    report.push(cluster::nodes_ready(&client).await);
    report.push(reconciliation::controllers_ready(&client).await);

    for (namespace, deployment) in workloads::PLATFORM_DEPLOYMENTS {
        report.push(workloads::deployment_ready(&client, namespace, deployment).await);
    }
    report.push(workloads::app_deployment(&client, config).await);
    report.push(workloads::database_cluster(&client).await);

    for probe in endpoints::ingress_probes(config) {
        report.push(endpoints::probe_once(&http, &probe).await);
    }
    report.push(endpoints::prometheus_targets(&http, config).await);

    Ok(report)
}

/// Smoke probes against the live stack: HTTP endpoints with retries plus the
/// reconciliation and database state the integration scripts used to grep for.
pub async fn smoke_report(config: &HomelabConfig) -> Result<CheckReport> {
    let client = clients::kube_client(config).await?;
    let http = clients::http_client(config)?;

    let mut report = CheckReport::default();

    for probe in endpoints::ingress_probes(config) {
        report.push(endpoints::probe_with_retry(&http, &probe, &config.timeouts).await);
    }
    report.push(endpoints::prometheus_targets(&http, config).await);

    report.push(reconciliation::kustomizations_ready(&client).await);
    report.push(workloads::database_cluster(&client).await);
    report.push(workloads::app_deployment(&client, config).await);

    Ok(report)
}
