use std::path::PathBuf;
use std::process::exit;

use anyhow::{bail, Result};
use simplelog::*;

use crate::cli::DevAction;
use crate::exec;

#[tokio::main(flavor = "current_thread")] // make this a sync function
pub async fn run(action: &DevAction, path: &PathBuf) {
    if let Err(e) = compose(action, path).await {
        error!("{e:?}");
        exit(1);
    }
}

async fn compose(action: &DevAction, path: &PathBuf) -> Result<()> {
    let compose_file = path.join("docker-compose.yml");
    if !compose_file.is_file() {
        bail!("no docker-compose.yml in {}", path.display());
    }
    let compose_file = compose_file.to_string_lossy().to_string();

    match action {
        DevAction::Up => {
            info!("starting development environment...");
            exec::run_streaming("docker-compose", &["-f", &compose_file, "up", "-d"]).await?;
            info!("<green>development environment started!</>");
            info!("  app: http://localhost:4000");
        }
        DevAction::Down => {
            info!("stopping development environment...");
            exec::run_streaming("docker-compose", &["-f", &compose_file, "down"]).await?;
            info!("<green>development environment stopped</>");
        }
    }

    Ok(())
}
