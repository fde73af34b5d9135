#[cfg(test)]
use pretty_assertions::assert_eq;

use crate::checks::endpoints::ingress_probes;
use crate::checks::{CheckOutcome, CheckReport};
use crate::configparser::config::HomelabConfig;

/// One failing check out of three yields a failed count of 1 and a failing
/// report, which is what drives health mode's non-zero exit.
#[test]
fn report_counts_failures() {
    let mut report = CheckReport::default();
    report.push(CheckOutcome::pass("cluster api", "reachable"));
    report.push(CheckOutcome::pass("flux controllers", "4/4 ready"));
    report.push(CheckOutcome::fail("phoenix-app/phoenix-app", "deployment not found"));

    assert_eq!(report.passed(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.all_passed());
}

#[test]
fn empty_report_passes() {
    let report = CheckReport::default();
    assert_eq!(report.failed(), 0);
    assert!(report.all_passed());
}

/// Probe URLs carry the configured domain suffix and the mapped HTTP port.
#[test]
fn probe_urls_from_config() {
    let mut config = HomelabConfig::default();
    config.domain_suffix = "lab.example".to_string();
    config.ports.http = 9080;

    let urls: Vec<String> = ingress_probes(&config)
        .into_iter()
        .map(|probe| probe.url)
        .collect();

    assert_eq!(
        urls,
        vec![
            "http://phoenix.lab.example:9080/health",
            "http://prometheus.lab.example:9080/-/healthy",
            "http://grafana.lab.example:9080/api/health",
        ]
    );
}
