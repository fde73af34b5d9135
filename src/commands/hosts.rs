use std::fs;
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result};
use simplelog::*;

use crate::cli::HostsAction;
use crate::cluster::hosts;
use crate::configparser::get_config;

pub fn run(action: &HostsAction) {
    if let Err(e) = hosts_action(action) {
        error!("{e:?}");
        exit(1);
    }
}

fn hosts_action(action: &HostsAction) -> Result<()> {
    let config = get_config()?;
    let path = Path::new(hosts::HOSTS_PATH);

    match action {
        HostsAction::Show => {
            info!("aliases this tool manages:");
            for hostname in hosts::service_hostnames(config) {
                info!("  {}", hosts::alias_line(&hostname));
            }

            let contents = fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            let managed: Vec<&str> = contents
                .lines()
                .filter(|line| line.trim_end().ends_with(hosts::MANAGED_MARKER))
                .collect();

            if managed.is_empty() {
                info!("no managed entries currently in {}", path.display());
            } else {
                info!("currently in {}:", path.display());
                for line in managed {
                    info!("  {line}");
                }
            }
        }
        HostsAction::Add => {
            let added = hosts::add_aliases(path, config)?;
            if added.is_empty() {
                info!("all aliases already present");
            }
        }
        HostsAction::Remove => {
            let removed = hosts::remove_managed(path)?;
            if removed == 0 {
                info!("no managed aliases to remove");
            }
        }
    }

    Ok(())
}
