use std::fs;
use std::io::Write;

#[cfg(test)]
use pretty_assertions::assert_eq;

use tempfile::NamedTempFile;

use crate::cluster::hosts::*;
use crate::configparser::config::HomelabConfig;

fn hosts_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn add_appends_all_aliases() {
    let config = HomelabConfig::default();
    let file = hosts_file("127.0.0.1 localhost\n");

    let added = add_aliases(file.path(), &config).unwrap();
    assert_eq!(added.len(), 3);

    let contents = fs::read_to_string(file.path()).unwrap();
    assert!(contents.contains("phoenix.local"));
    assert!(contents.contains("grafana.local"));
    assert!(contents.contains("prometheus.local"));
    assert!(contents.starts_with("127.0.0.1 localhost\n"));
}

/// A second add must not duplicate any lines.
#[test]
fn add_twice_is_idempotent() {
    let config = HomelabConfig::default();
    let file = hosts_file("127.0.0.1 localhost\n");

    let first = add_aliases(file.path(), &config).unwrap();
    assert_eq!(first.len(), 3);
    let after_first = fs::read_to_string(file.path()).unwrap();

    let second = add_aliases(file.path(), &config).unwrap();
    assert_eq!(second, Vec::<String>::new());
    assert_eq!(fs::read_to_string(file.path()).unwrap(), after_first);
}

/// A hostname someone added by hand is left alone, both on add and cleanup.
#[test]
fn unmanaged_entries_are_never_touched() {
    let config = HomelabConfig::default();
    let file = hosts_file("127.0.0.1 localhost\n192.168.1.5 phoenix.local\n");

    let added = add_aliases(file.path(), &config).unwrap();
    assert_eq!(added.len(), 2); // grafana + prometheus only

    let removed = remove_managed(file.path()).unwrap();
    assert_eq!(removed, 2);

    let contents = fs::read_to_string(file.path()).unwrap();
    assert_eq!(contents, "127.0.0.1 localhost\n192.168.1.5 phoenix.local\n");
}

/// Rollback removes exactly what add returned and nothing else.
#[test]
fn remove_consumes_added_lines() {
    let config = HomelabConfig::default();
    let file = hosts_file("127.0.0.1 localhost\n");

    let added = add_aliases(file.path(), &config).unwrap();
    let removed = remove_aliases(file.path(), &added).unwrap();
    assert_eq!(removed, added.len());

    let contents = fs::read_to_string(file.path()).unwrap();
    assert_eq!(contents, "127.0.0.1 localhost\n");
}

#[test]
fn remove_on_clean_file_is_noop() {
    let file = hosts_file("127.0.0.1 localhost\n");

    assert_eq!(remove_managed(file.path()).unwrap(), 0);
    assert_eq!(remove_aliases(file.path(), &[]).unwrap(), 0);
    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "127.0.0.1 localhost\n"
    );
}

#[test]
fn hostnames_follow_domain_suffix() {
    let mut config = HomelabConfig::default();
    config.domain_suffix = "lab.example".to_string();

    assert_eq!(
        service_hostnames(&config),
        vec![
            "phoenix.lab.example",
            "grafana.lab.example",
            "prometheus.lab.example"
        ]
    );
}
