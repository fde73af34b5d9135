// Small typed helpers over the kube client shared by the waiter, the apply
// stages, and the health checks.

use std::time::Duration;

use anyhow::Result;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::serde_json::Value;
use kube::api::{ApiResource, DynamicObject, GroupVersionKind, Patch, PatchParams};
use kube::{Api, Client};
use simplelog::*;
use tokio::time::{sleep, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub async fn namespace_exists(client: &Client, name: &str) -> Result<bool> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    Ok(namespaces.get_opt(name).await?.is_some())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicaCount {
    pub ready: i32,
    pub desired: i32,
}

impl ReplicaCount {
    pub fn is_ready(&self) -> bool {
        self.ready == self.desired
    }
}

/// Ready/desired replicas for a deployment, or None if it does not exist.
pub async fn deployment_replicas(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<Option<ReplicaCount>> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);

    let Some(deployment) = deployments.get_opt(name).await? else {
        return Ok(None);
    };

    let desired = deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.replicas)
        .unwrap_or(0);
    let ready = deployment
        .status
        .as_ref()
        .and_then(|status| status.ready_replicas)
        .unwrap_or(0);

    Ok(Some(ReplicaCount { ready, desired }))
}

/// Set the replica count of a deployment through its scale subresource.
pub async fn scale_deployment(
    client: &Client,
    namespace: &str,
    name: &str,
    replicas: i32,
) -> Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);

    let patch = k8s_openapi::serde_json::json!({ "spec": { "replicas": replicas } });
    deployments
        .patch_scale(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    info!("scaled {namespace}/{name} to {replicas} replica(s)");
    Ok(())
}

/// Whether this CRD exists and has condition Established=True.
pub async fn crd_established(client: &Client, name: &str) -> Result<bool> {
    let crds: Api<CustomResourceDefinition> = Api::all(client.clone());

    let Some(crd) = crds.get_opt(name).await? else {
        return Ok(false);
    };

    Ok(crd
        .status
        .map(|status| {
            status
                .conditions
                .into_iter()
                .flatten()
                .any(|c| c.type_ == "Established" && c.status == "True")
        })
        .unwrap_or(false))
}

/// Poll until the CRD is established or the timeout elapses.
/// Ok(false) means the deadline passed; API errors propagate.
pub async fn wait_for_crd(client: &Client, name: &str, timeout: Duration) -> Result<bool> {
    let deadline = Instant::now() + timeout;

    loop {
        if crd_established(client, name).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        trace!("waiting for crd {name}...");
        sleep(POLL_INTERVAL).await;
    }
}

/// Api handle for a custom resource we don't carry typed bindings for
/// (Flux Kustomizations, CNPG Clusters).
pub fn dynamic_api(
    client: &Client,
    group: &str,
    version: &str,
    kind: &str,
    namespace: Option<&str>,
) -> Api<DynamicObject> {
    let gvk = GroupVersionKind::gvk(group, version, kind);
    let resource = ApiResource::from_gvk(&gvk);

    match namespace {
        Some(ns) => Api::namespaced_with(client.clone(), ns, &resource),
        None => Api::all_with(client.clone(), &resource),
    }
}

pub fn status_field<'a>(obj: &'a DynamicObject, field: &str) -> Option<&'a Value> {
    obj.data.get("status").and_then(|status| status.get(field))
}

/// Whether a dynamic object carries condition Ready=True in its status.
pub fn has_ready_condition(obj: &DynamicObject) -> bool {
    status_field(obj, "conditions")
        .and_then(Value::as_array)
        .map(|conditions| {
            conditions.iter().any(|c| {
                c.get("type").and_then(Value::as_str) == Some("Ready")
                    && c.get("status").and_then(Value::as_str) == Some("True")
            })
        })
        .unwrap_or(false)
}
