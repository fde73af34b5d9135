// Workload checks: platform deployments, the application deployment, and the
// CNPG database cluster.

use k8s_openapi::serde_json::Value;
use kube::Client;

use super::CheckOutcome;
use crate::configparser::config::HomelabConfig;
use crate::kube_util;

/// Deployments the infrastructure manifests are expected to produce.
pub const PLATFORM_DEPLOYMENTS: [(&str, &str); 4] = [
    ("ingress-nginx", "ingress-nginx-controller"),
    ("cnpg-system", "cnpg-controller-manager"),
    ("monitoring", "prometheus-operator"),
    ("monitoring", "grafana"),
];

/// Name of the application deployment in the application namespace.
pub const APP_DEPLOYMENT: &str = "phoenix-app";

pub const DATABASE_NAMESPACE: &str = "database";
pub const DATABASE_CLUSTER: &str = "postgres-cluster";

const HEALTHY_PHASE: &str = "Cluster in healthy state";

pub async fn deployment_ready(client: &Client, namespace: &str, name: &str) -> CheckOutcome {
    let check = format!("{namespace}/{name}");

    match kube_util::deployment_replicas(client, namespace, name).await {
        Ok(Some(replicas)) if replicas.is_ready() => CheckOutcome::pass(
            check,
            format!("{}/{} replicas ready", replicas.ready, replicas.desired),
        ),
        Ok(Some(replicas)) => CheckOutcome::fail(
            check,
            format!("{}/{} replicas ready", replicas.ready, replicas.desired),
        ),
        Ok(None) => CheckOutcome::fail(check, "deployment not found"),
        Err(e) => CheckOutcome::fail(check, format!("cannot query deployment: {e}")),
    }
}

pub async fn app_deployment(client: &Client, config: &HomelabConfig) -> CheckOutcome {
    deployment_ready(client, &config.namespace, APP_DEPLOYMENT).await
}

/// CNPG cluster health: all instances ready (and at least one exists), and
/// the operator reports the healthy phase.
pub async fn database_cluster(client: &Client) -> CheckOutcome {
    let check = "postgres cluster";

    let api = kube_util::dynamic_api(
        client,
        "postgresql.cnpg.io",
        "v1",
        "Cluster",
        Some(DATABASE_NAMESPACE),
    );

    let cluster = match api.get_opt(DATABASE_CLUSTER).await {
        Ok(Some(cluster)) => cluster,
        Ok(None) => return CheckOutcome::fail(check, "cluster not found"),
        Err(e) => return CheckOutcome::fail(check, format!("cannot query cluster: {e}")),
    };

    let instances = kube_util::status_field(&cluster, "instances")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let ready = kube_util::status_field(&cluster, "readyInstances")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let phase = kube_util::status_field(&cluster, "phase")
        .and_then(Value::as_str)
        .unwrap_or("Unknown");

    let healthy = instances > 0 && ready == instances && phase == HEALTHY_PHASE;
    let detail = format!("{ready}/{instances} instances ready, phase: {phase}");

    if healthy {
        CheckOutcome::pass(check, detail)
    } else {
        CheckOutcome::fail(check, detail)
    }
}
