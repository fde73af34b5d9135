use k8s_openapi::api::core::v1::{Pod, PodCondition, PodStatus};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

#[cfg(test)]
use pretty_assertions::assert_eq;

use crate::cluster::waiter::{classify_pods, PodsState};

fn pod(name: &str, phase: &str, ready: bool) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        status: Some(PodStatus {
            phase: Some(phase.to_string()),
            conditions: Some(vec![PodCondition {
                type_: "Ready".to_string(),
                status: if ready { "True" } else { "False" }.to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A namespace with no pods is not ready; the workloads just haven't been
/// created yet.
#[test]
fn empty_namespace_is_not_settled() {
    assert_eq!(classify_pods(&[]), PodsState::NoPods);
}

#[test]
fn ready_pods_settle() {
    let pods = vec![pod("web-0", "Running", true), pod("web-1", "Running", true)];
    assert_eq!(classify_pods(&pods), PodsState::AllSettled);
}

/// Completed jobs count as settled even without a Ready condition.
#[test]
fn succeeded_pods_settle() {
    let mut job = pod("migrate-abc", "Succeeded", false);
    job.status.as_mut().unwrap().conditions = None;

    assert_eq!(classify_pods(&[job]), PodsState::AllSettled);
}

#[test]
fn unready_pods_are_named() {
    let pods = vec![pod("web-0", "Running", true), pod("db-0", "Pending", false)];

    assert_eq!(
        classify_pods(&pods),
        PodsState::Pending(vec!["db-0".to_string()])
    );
}
