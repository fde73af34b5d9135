use std::path::PathBuf;
use std::process::exit;

use simplelog::*;

use crate::configparser::get_config;
use crate::scaffold;

pub fn run(path: &PathBuf) {
    info!("scaffolding gitops repository in {}...", path.display());

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    if let Err(e) = scaffold::render_repo(path, config) {
        error!("{e:?}");
        exit(1);
    }

    info!("<green>repository scaffolded!</> commit it and run `phoenixctl` to bootstrap");
}
