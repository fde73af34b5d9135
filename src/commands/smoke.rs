use std::process::exit;

use simplelog::*;

use crate::checks;
use crate::configparser::get_config;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run() {
    info!("running smoke tests...");

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    let report = match checks::smoke_report(config).await {
        Ok(report) => report,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };

    report.print();
    if !report.all_passed() {
        exit(1);
    }
    info!("<green>smoke tests passed!</>");
}
