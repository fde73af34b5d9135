use std::process::exit;

use anyhow::Result;
use simplelog::*;

use crate::configparser::get_config;
use crate::exec;
use crate::gitops;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run() {
    if let Err(e) = show_status().await {
        error!("{e:?}");
        exit(1);
    }
}

/// Stream each tool's own status output under a header; no parsing here.
async fn show_status() -> Result<()> {
    let config = get_config()?;

    info!("<bold>=== flux ===</>");
    let args = gitops::flux_args(config, &["get", "all"]);
    exec::run_streaming("flux", &exec::argv(&args)).await?;

    for (header, resource) in [("pods", "pods"), ("services", "svc"), ("ingress", "ingress")] {
        info!("<bold>=== {header} ===</>");

        let mut args = vec!["get".to_string(), resource.to_string(), "-A".to_string()];
        args.extend(config.cluster_flags());
        exec::run_streaming("kubectl", &exec::argv(&args)).await?;
    }

    Ok(())
}
