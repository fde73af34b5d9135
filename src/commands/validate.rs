use std::path::Path;
use std::process::exit;

use anyhow::{anyhow, Context, Error, Result};
use itertools::Itertools;
use simplelog::*;

use crate::configparser::config::HomelabConfig;
use crate::configparser::get_config;
use crate::gitops::stages;

pub fn run() {
    info!("validating config and manifests...");

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:?}");
            exit(1);
        }
    };
    debug!("config loaded");

    let errors = validate_manifests(config);
    if !errors.is_empty() {
        for err in errors.iter() {
            error!("{err:?}\n");
        }
        exit(1);
    }

    info!("<green>everything is ok!</>");
}

/// Check the manifest tree: every stage directory exists with a
/// kustomization.yaml, and every yaml file under the root parses. All
/// problems are collected and reported together.
pub fn validate_manifests(config: &HomelabConfig) -> Vec<Error> {
    let mut errors = vec![];
    let root = Path::new(&config.manifests.root);

    if !root.is_dir() {
        errors.push(anyhow!(
            "manifest root {} is missing (run `phoenixctl init` to scaffold it)",
            root.display()
        ));
        return errors;
    }

    for stage in stages::STAGES.iter() {
        let dir = stages::stage_dir(config, stage);
        if !dir.is_dir() {
            errors.push(anyhow!("stage directory {} is missing", dir.display()));
        } else if !dir.join("kustomization.yaml").is_file() {
            errors.push(anyhow!("{} has no kustomization.yaml", dir.display()));
        }
    }

    let pattern = format!("{}/**/*.yaml", root.display());
    let files = match glob::glob(&pattern) {
        Ok(files) => files,
        Err(e) => {
            errors.push(anyhow!(e).context("bad manifest glob pattern"));
            return errors;
        }
    };

    let (parsed, parse_errors): (Vec<_>, Vec<_>) = files
        .filter_map(|entry| entry.ok())
        .map(|path| {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("could not read {}", path.display()))?;
            multidoc_deserialize(&contents)
                .with_context(|| format!("could not parse {}", path.display()))
        })
        .partition_result();

    debug!(
        "parsed {} manifest files, {} failed",
        parsed.len(),
        parse_errors.len()
    );
    errors.extend(parse_errors);

    errors
}

/// Deserialize multi-document yaml string into a Vec of the documents
pub fn multidoc_deserialize(data: &str) -> Result<Vec<serde_yml::Value>> {
    use serde::Deserialize;
    let mut docs = vec![];
    for de in serde_yml::Deserializer::from_str(data) {
        match serde_yml::Value::deserialize(de)? {
            serde_yml::Value::Null => (),
            not_null => docs.push(not_null),
        };
    }
    Ok(docs)
}
