use std::process::exit;

use simplelog::*;

use crate::configparser::get_config;
use crate::provision;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run() {
    info!("tearing down the homelab...");

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    if let Err(e) = provision::cleanup(config).await {
        error!("{e:?}");
        exit(1);
    }
}
