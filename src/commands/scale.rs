use std::process::exit;

use anyhow::Result;
use simplelog::*;

use crate::checks::workloads::APP_DEPLOYMENT;
use crate::cli::ScaleDirection;
use crate::clients;
use crate::configparser::get_config;
use crate::kube_util;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run(direction: &ScaleDirection, replicas: &Option<i32>) {
    let count = replicas.unwrap_or(match direction {
        ScaleDirection::Up => 3,
        ScaleDirection::Down => 1,
    });

    info!("scaling <bold>{APP_DEPLOYMENT}</> to {count} replica(s)...");

    if let Err(e) = scale(count).await {
        error!("{e:?}");
        exit(1);
    }
}

async fn scale(replicas: i32) -> Result<()> {
    let config = get_config()?;
    let client = clients::kube_client(config).await?;
    kube_util::scale_deployment(&client, &config.namespace, APP_DEPLOYMENT, replicas).await
}
