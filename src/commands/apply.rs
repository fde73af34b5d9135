use std::process::exit;

use anyhow::Result;
use simplelog::*;

use crate::clients;
use crate::configparser::get_config;
use crate::gitops::stages;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run() {
    info!("applying manifest stages...");

    if let Err(e) = apply().await {
        error!("{e:?}");
        exit(1);
    }

    info!("<green>all stages applied!</>");
}

async fn apply() -> Result<()> {
    let config = get_config()?;
    let client = clients::kube_client(config).await?;
    stages::apply_all(&client, config).await
}
