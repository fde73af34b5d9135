// Managed hosts-file aliases for the ingress hostnames.
//
// The hostname set is computed in one place (service_hostnames); the add
// operation returns exactly the lines it appended so rollback can remove
// those and nothing else, and every managed line carries a marker comment so
// cleanup can find them without a second hardcoded list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use simplelog::*;

use crate::configparser::config::HomelabConfig;

pub const HOSTS_PATH: &str = "/etc/hosts";
pub const MANAGED_MARKER: &str = "# added by phoenixctl";

const SERVICES: [&str; 3] = ["phoenix", "grafana", "prometheus"];

/// The ingress hostnames the homelab serves, derived from the domain suffix.
pub fn service_hostnames(config: &HomelabConfig) -> Vec<String> {
    SERVICES
        .iter()
        .map(|service| format!("{service}.{}", config.domain_suffix))
        .collect()
}

pub fn alias_line(hostname: &str) -> String {
    format!("127.0.0.1 {hostname} {MANAGED_MARKER}")
}

/// Whether any non-comment line already resolves this hostname.
fn hostname_present(contents: &str, hostname: &str) -> bool {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .any(|line| line.split_whitespace().any(|token| token == hostname))
}

/// Append loopback aliases for any hostname not already present.
/// Returns the lines actually added (empty when everything was present),
/// which is the exact set a later removal must consume.
pub fn add_aliases(path: &Path, config: &HomelabConfig) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    let mut updated = contents.clone();
    let mut added = vec![];

    for hostname in service_hostnames(config) {
        if hostname_present(&contents, &hostname) {
            debug!("hosts entry for {hostname} already present");
            continue;
        }

        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        let line = alias_line(&hostname);
        updated.push_str(&line);
        updated.push('\n');
        added.push(line);
    }

    if added.is_empty() {
        debug!("all hosts aliases already present");
        return Ok(added);
    }

    fs::write(path, &updated).with_context(|| format!("could not write {}", path.display()))?;

    info!("added {} alias(es) to {}", added.len(), path.display());
    Ok(added)
}

/// Remove exactly the given lines (as returned by add_aliases).
pub fn remove_aliases(path: &Path, entries: &[String]) -> Result<usize> {
    if entries.is_empty() {
        return Ok(0);
    }
    remove_matching(path, |line| entries.iter().any(|entry| entry == line))
}

/// Remove every line carrying the managed marker, leaving unmanaged lines
/// untouched. Used by cleanup, which has no record of what a previous
/// bootstrap run added.
pub fn remove_managed(path: &Path) -> Result<usize> {
    remove_matching(path, |line| line.trim_end().ends_with(MANAGED_MARKER))
}

fn remove_matching(path: &Path, matches: impl Fn(&str) -> bool) -> Result<usize> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    let kept: Vec<&str> = contents.lines().filter(|line| !matches(line)).collect();
    let removed = contents.lines().count() - kept.len();

    if removed > 0 {
        fs::write(path, kept.join("\n") + "\n")
            .with_context(|| format!("could not write {}", path.display()))?;
        info!("removed {removed} alias(es) from {}", path.display());
    }

    Ok(removed)
}
