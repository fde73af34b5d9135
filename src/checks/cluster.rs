// Cluster-level checks: apiserver reachability and node readiness.

use k8s_openapi::api::core::v1::Node;
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};

use super::CheckOutcome;

const API_CHECK: &str = "cluster api";
const NODES_CHECK: &str = "node readiness";

pub async fn api_reachable(client: &Client) -> CheckOutcome {
    match client.apiserver_version().await {
        Ok(version) => CheckOutcome::pass(
            API_CHECK,
            format!("apiserver {}.{} reachable", version.major, version.minor),
        ),
        Err(e) => CheckOutcome::fail(API_CHECK, format!("cannot reach apiserver: {e}")),
    }
}

pub async fn nodes_ready(client: &Client) -> CheckOutcome {
    let nodes: Api<Node> = Api::all(client.clone());

    let list = match nodes.list(&ListParams::default()).await {
        Ok(list) => list,
        Err(e) => return CheckOutcome::fail(NODES_CHECK, format!("cannot list nodes: {e}")),
    };

    let total = list.items.len();
    let unready: Vec<String> = list
        .items
        .iter()
        .filter(|node| !node_ready(node))
        .map(|node| node.name_any())
        .collect();

    if total == 0 {
        CheckOutcome::fail(NODES_CHECK, "no nodes found")
    } else if unready.is_empty() {
        CheckOutcome::pass(NODES_CHECK, format!("{total}/{total} nodes ready"))
    } else {
        CheckOutcome::fail(
            NODES_CHECK,
            format!(
                "{}/{} nodes ready (not ready: {})",
                total - unready.len(),
                total,
                unready.join(", ")
            ),
        )
    }
}

fn node_ready(node: &Node) -> bool {
    node.status
        .as_ref()
        .and_then(|status| status.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        })
        .unwrap_or(false)
}
