// Renders the GitOps repository skeleton the pipeline expects: the three
// manifest stages plus the Flux cluster path, from embedded templates.
// Existing files are left alone, so rerunning init is safe.

pub mod templates;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use simplelog::*;

use crate::configparser::config::HomelabConfig;

#[derive(Serialize)]
struct ScaffoldVars {
    namespace: String,
    domain_suffix: String,
    image: String,
    manifest_root: String,
}

impl ScaffoldVars {
    fn from_config(config: &HomelabConfig) -> Self {
        // without a registry user the image stays a plain local name
        let image = match config.docker_username.as_deref() {
            Some(user) if !user.is_empty() => {
                format!("{user}/{}:{}", config.image_name, config.tag)
            }
            _ => format!("{}:{}", config.image_name, config.tag),
        };

        ScaffoldVars {
            namespace: config.namespace.clone(),
            domain_suffix: config.domain_suffix.clone(),
            image,
            manifest_root: config.manifests.root.clone(),
        }
    }
}

/// Render the repository skeleton under `<root>/<manifest root>`.
/// Returns the number of files written.
pub fn render_repo(root: &Path, config: &HomelabConfig) -> Result<usize> {
    let vars = ScaffoldVars::from_config(config);
    let env = templates::template_env();
    let manifest_root = root.join(&config.manifests.root);

    let mut written = 0;
    for (relative, template) in templates::SCAFFOLD_FILES {
        let target = manifest_root.join(relative);
        if target.exists() {
            info!("{} already exists, skipping", target.display());
            continue;
        }

        let rendered = env
            .render_str(template, &vars)
            .with_context(|| format!("could not render template for {relative}"))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        fs::write(&target, rendered)
            .with_context(|| format!("could not write {}", target.display()))?;

        debug!("wrote {}", target.display());
        written += 1;
    }

    info!(
        "scaffolded {written} file(s) under {}",
        manifest_root.display()
    );
    Ok(written)
}
