// HTTP probes against the ingress hostnames, and the Prometheus target query.
//
// The probe URLs carry the configured HTTP port, since the k3d loadbalancer
// maps cluster port 80 onto a high host port.

use std::time::Duration;

use serde::Deserialize;
use simplelog::*;
use tokio::time::sleep;

use super::CheckOutcome;
use crate::configparser::config::{HomelabConfig, Timeouts};

#[derive(Debug, Clone)]
pub struct Probe {
    pub name: String,
    pub url: String,
}

/// The health/readiness URLs the stack serves through the ingress.
pub fn ingress_probes(config: &HomelabConfig) -> Vec<Probe> {
    let suffix = &config.domain_suffix;
    let port = config.ports.http;

    vec![
        Probe {
            name: "app health endpoint".to_string(),
            url: format!("http://phoenix.{suffix}:{port}/health"),
        },
        Probe {
            name: "prometheus health endpoint".to_string(),
            url: format!("http://prometheus.{suffix}:{port}/-/healthy"),
        },
        Probe {
            name: "grafana health endpoint".to_string(),
            url: format!("http://grafana.{suffix}:{port}/api/health"),
        },
    ]
}

async fn fetch_status(client: &reqwest::Client, url: &str) -> Result<reqwest::StatusCode, String> {
    client
        .get(url)
        .send()
        .await
        .map(|response| response.status())
        .map_err(|e| format!("{e}"))
}

/// Probe the endpoint exactly once; any 2xx status passes.
pub async fn probe_once(client: &reqwest::Client, probe: &Probe) -> CheckOutcome {
    match fetch_status(client, &probe.url).await {
        Ok(status) if status.is_success() => {
            CheckOutcome::pass(&probe.name, format!("{} -> {status}", probe.url))
        }
        Ok(status) => CheckOutcome::fail(&probe.name, format!("{} -> {status}", probe.url)),
        Err(e) => CheckOutcome::fail(&probe.name, format!("{} unreachable: {e}", probe.url)),
    }
}

/// Probe with a fixed attempt count and fixed delay, succeeding on the first
/// 2xx. The stack may still be settling when the smoke tests start.
pub async fn probe_with_retry(
    client: &reqwest::Client,
    probe: &Probe,
    timeouts: &Timeouts,
) -> CheckOutcome {
    let mut last_detail = String::new();

    for attempt in 1..=timeouts.probe_attempts {
        match fetch_status(client, &probe.url).await {
            Ok(status) if status.is_success() => {
                return CheckOutcome::pass(
                    &probe.name,
                    format!("{} -> {status} (attempt {attempt})", probe.url),
                );
            }
            Ok(status) => last_detail = format!("{} -> {status}", probe.url),
            Err(e) => last_detail = format!("{} unreachable: {e}", probe.url),
        }

        if attempt < timeouts.probe_attempts {
            debug!(
                "probe {} attempt {attempt}/{} failed, retrying in {}s",
                probe.name, timeouts.probe_attempts, timeouts.probe_delay_secs
            );
            sleep(Duration::from_secs(timeouts.probe_delay_secs)).await;
        }
    }

    CheckOutcome::fail(
        &probe.name,
        format!("{last_detail} (after {} attempts)", timeouts.probe_attempts),
    )
}

#[derive(Debug, Deserialize)]
struct TargetsResponse {
    data: TargetsData,
}

#[derive(Debug, Deserialize)]
struct TargetsData {
    #[serde(rename = "activeTargets")]
    active_targets: Vec<ActiveTarget>,
}

#[derive(Debug, Deserialize)]
struct ActiveTarget {
    health: String,
}

/// At least one active Prometheus scrape target reports health "up".
pub async fn prometheus_targets(client: &reqwest::Client, config: &HomelabConfig) -> CheckOutcome {
    let check = "prometheus targets";
    let url = format!(
        "http://prometheus.{}:{}/api/v1/targets",
        config.domain_suffix, config.ports.http
    );

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return CheckOutcome::fail(check, format!("{url} unreachable: {e}")),
    };

    if !response.status().is_success() {
        return CheckOutcome::fail(check, format!("{url} -> {}", response.status()));
    }

    let targets: TargetsResponse = match response.json().await {
        Ok(targets) => targets,
        Err(e) => return CheckOutcome::fail(check, format!("cannot parse targets: {e}")),
    };

    let total = targets.data.active_targets.len();
    let up = targets
        .data
        .active_targets
        .iter()
        .filter(|target| target.health == "up")
        .count();

    if up > 0 {
        CheckOutcome::pass(check, format!("{up}/{total} targets up"))
    } else {
        CheckOutcome::fail(check, format!("{up}/{total} targets up"))
    }
}
