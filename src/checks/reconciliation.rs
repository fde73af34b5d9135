// Flux state checks: controller deployments and Kustomization conditions,
// read from the API as structured objects rather than scraped `flux` output.

use kube::api::ListParams;
use kube::{Client, ResourceExt};

use super::CheckOutcome;
use crate::gitops::FLUX_NAMESPACE;
use crate::kube_util;

/// The controller deployments `flux install` manages.
pub const FLUX_CONTROLLERS: [&str; 4] = [
    "source-controller",
    "kustomize-controller",
    "helm-controller",
    "notification-controller",
];

const CONTROLLERS_CHECK: &str = "flux controllers";
const KUSTOMIZATIONS_CHECK: &str = "flux kustomizations";

pub async fn controllers_ready(client: &Client) -> CheckOutcome {
    let mut unready = vec![];

    for name in FLUX_CONTROLLERS {
        match kube_util::deployment_replicas(client, FLUX_NAMESPACE, name).await {
            Ok(Some(replicas)) if replicas.is_ready() => (),
            Ok(Some(replicas)) => unready.push(format!(
                "{name} ({}/{})",
                replicas.ready, replicas.desired
            )),
            Ok(None) => unready.push(format!("{name} (not found)")),
            Err(e) => {
                return CheckOutcome::fail(
                    CONTROLLERS_CHECK,
                    format!("cannot query {name}: {e}"),
                )
            }
        }
    }

    if unready.is_empty() {
        CheckOutcome::pass(
            CONTROLLERS_CHECK,
            format!("{}/{} controllers ready", FLUX_CONTROLLERS.len(), FLUX_CONTROLLERS.len()),
        )
    } else {
        CheckOutcome::fail(CONTROLLERS_CHECK, format!("not ready: {}", unready.join(", ")))
    }
}

/// All Kustomization objects in flux-system carry condition Ready=True.
pub async fn kustomizations_ready(client: &Client) -> CheckOutcome {
    let api = kube_util::dynamic_api(
        client,
        "kustomize.toolkit.fluxcd.io",
        "v1",
        "Kustomization",
        Some(FLUX_NAMESPACE),
    );

    let list = match api.list(&ListParams::default()).await {
        Ok(list) => list,
        Err(e) => {
            return CheckOutcome::fail(
                KUSTOMIZATIONS_CHECK,
                format!("cannot list kustomizations: {e}"),
            )
        }
    };

    if list.items.is_empty() {
        return CheckOutcome::fail(KUSTOMIZATIONS_CHECK, "no kustomizations found");
    }

    let total = list.items.len();
    let unready: Vec<String> = list
        .items
        .iter()
        .filter(|obj| !kube_util::has_ready_condition(obj))
        .map(|obj| obj.name_any())
        .collect();

    if unready.is_empty() {
        CheckOutcome::pass(
            KUSTOMIZATIONS_CHECK,
            format!("{total}/{total} reconciled"),
        )
    } else {
        CheckOutcome::fail(
            KUSTOMIZATIONS_CHECK,
            format!("not reconciled: {}", unready.join(", ")),
        )
    }
}
