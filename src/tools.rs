// Required external CLIs and their installers.

use anyhow::{bail, Context, Result};
use simplelog::*;

use crate::exec;

pub struct Tool {
    pub name: &'static str,
    pub install: InstallMethod,
}

pub enum InstallMethod {
    /// Official installer, safe to pipe through a shell non-interactively.
    Script(&'static str),
    /// Needs a human; point at the docs instead.
    Manual(&'static str),
}

pub const REQUIRED_TOOLS: [Tool; 5] = [
    Tool {
        name: "docker",
        install: InstallMethod::Manual("https://docs.docker.com/engine/install/"),
    },
    Tool {
        name: "kubectl",
        install: InstallMethod::Script(
            "curl -LO \"https://dl.k8s.io/release/$(curl -L -s https://dl.k8s.io/release/stable.txt)/bin/linux/amd64/kubectl\" \
             && install -m 0755 kubectl /usr/local/bin/kubectl && rm kubectl",
        ),
    },
    Tool {
        name: "k3d",
        install: InstallMethod::Script(
            "curl -sfL https://raw.githubusercontent.com/k3d-io/k3d/main/install.sh | bash",
        ),
    },
    Tool {
        name: "flux",
        install: InstallMethod::Script("curl -sfL https://fluxcd.io/install.sh | bash"),
    },
    Tool {
        name: "helm",
        install: InstallMethod::Script(
            "curl -sfL https://raw.githubusercontent.com/helm/helm/main/scripts/get-helm-3 | bash",
        ),
    },
];

/// All required tools not currently resolvable on PATH.
pub async fn missing_tools() -> Vec<&'static Tool> {
    let mut missing = vec![];
    for tool in REQUIRED_TOOLS.iter() {
        if !exec::binary_on_path(tool.name).await {
            missing.push(tool);
        }
    }
    missing
}

/// Check every required tool and report all missing ones together, so the
/// user fixes their environment in one pass instead of one error at a time.
pub async fn verify_required() -> Result<()> {
    debug!("checking required tools");

    let missing = missing_tools().await;
    if missing.is_empty() {
        debug!("all required tools present");
        return Ok(());
    }

    for tool in &missing {
        error!("missing required tool: <bold>{}</>", tool.name);
    }
    bail!(
        "{} required tool(s) missing; run `phoenixctl install-tools` or install them manually",
        missing.len()
    );
}

/// Install whatever is missing via each tool's official installer script.
/// Tools that are already present are skipped.
pub async fn install_missing() -> Result<()> {
    for tool in REQUIRED_TOOLS.iter() {
        if exec::binary_on_path(tool.name).await {
            info!("<bold>{}</> already installed, skipping", tool.name);
            continue;
        }

        match tool.install {
            InstallMethod::Script(script) => {
                info!("installing <bold>{}</>...", tool.name);
                exec::run_streaming("sh", &["-c", script])
                    .await
                    .with_context(|| format!("installer for {} failed", tool.name))?;
                info!("<green>{} installed</>", tool.name);
            }
            InstallMethod::Manual(docs) => {
                warn!("cannot install {} automatically, see {docs}", tool.name);
            }
        }
    }

    Ok(())
}
