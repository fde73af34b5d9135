use std::process::exit;

use simplelog::*;

use crate::tools;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run() {
    info!("installing missing tools...");

    if let Err(e) = tools::install_missing().await {
        error!("{e:?}");
        exit(1);
    }

    info!("<green>tools are ready!</>");
}
