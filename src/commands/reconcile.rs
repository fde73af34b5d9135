use std::process::exit;

use simplelog::*;

use crate::configparser::get_config;
use crate::gitops;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run() {
    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    if let Err(e) = gitops::reconcile(config).await {
        error!("{e:?}");
        exit(1);
    }
}
