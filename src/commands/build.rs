use std::path::PathBuf;
use std::process::exit;

use simplelog::*;

use crate::configparser::get_config;
use crate::image;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run(push: &bool, path: &PathBuf) {
    info!("building application image...");

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    if let Err(e) = image::build(config, path, *push).await {
        error!("{e:?}");
        exit(1);
    }
}
