// Ordered manifest stages with explicit preconditions.
//
// The old convention was "apply three directories in the right order and hope
// the CRDs show up in time". Each stage now declares the CRDs it depends on,
// and the applier waits for those to be Established before applying, failing
// loudly with the stage and CRD name if they never arrive.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use kube::Client;
use simplelog::*;

use crate::configparser::config::HomelabConfig;
use crate::exec;
use crate::kube_util;

pub struct Stage {
    pub name: &'static str,
    pub subdir: &'static str,
    /// CRDs (by full plural.group name) that must be Established before this
    /// stage's manifests can be applied.
    pub required_crds: &'static [&'static str],
}

/// The fixed apply order: namespaces before workload infrastructure, operators
/// before the custom resources that need their CRDs.
pub const STAGES: [Stage; 3] = [
    Stage {
        name: "bootstrap",
        subdir: "bootstrap",
        required_crds: &[],
    },
    Stage {
        name: "infrastructure",
        subdir: "infrastructure",
        required_crds: &[
            "kustomizations.kustomize.toolkit.fluxcd.io",
            "helmreleases.helm.toolkit.fluxcd.io",
        ],
    },
    Stage {
        name: "apps",
        subdir: "apps",
        required_crds: &["clusters.postgresql.cnpg.io"],
    },
];

pub fn stage_dir(config: &HomelabConfig, stage: &Stage) -> PathBuf {
    Path::new(&config.manifests.root).join(stage.subdir)
}

/// Apply every stage in order, gating each on its declared CRDs.
pub async fn apply_all(client: &Client, config: &HomelabConfig) -> Result<()> {
    let timeout = Duration::from_secs(config.timeouts.crd_wait_secs);

    for stage in STAGES.iter() {
        let dir = stage_dir(config, stage);
        if !dir.is_dir() {
            bail!(
                "manifest stage directory {} is missing (run `phoenixctl init` to scaffold it)",
                dir.display()
            );
        }

        for crd in stage.required_crds {
            debug!("stage {} requires crd {crd}", stage.name);
            let established = kube_util::wait_for_crd(client, crd, timeout)
                .await
                .with_context(|| format!("could not query CRD {crd}"))?;
            if !established {
                bail!(
                    "stage {} requires CRD {crd}, which was not established within {}s",
                    stage.name,
                    timeout.as_secs()
                );
            }
        }

        apply_stage(config, stage, &dir).await?;
    }

    Ok(())
}

async fn apply_stage(config: &HomelabConfig, stage: &Stage, dir: &Path) -> Result<()> {
    info!("applying stage <bold>{}</>...", stage.name);

    let mut args = vec![
        "apply".to_string(),
        "-k".to_string(),
        dir.to_string_lossy().into_owned(),
    ];
    args.extend(config.cluster_flags());

    exec::run_streaming("kubectl", &exec::argv(&args))
        .await
        .with_context(|| format!("could not apply manifest stage {}", stage.name))?;

    info!("<green>stage {} applied</>", stage.name);
    Ok(())
}
