use std::process::exit;

use simplelog::*;

use crate::configparser::get_config;
use crate::provision;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run(keep_on_failure: &bool) {
    info!("bootstrapping the homelab...");

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    if let Err(e) = provision::bootstrap(config, *keep_on_failure).await {
        error!("{e:?}");
        exit(1);
    }
}
