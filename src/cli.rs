use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
/// Bootstrap manager for the Phoenix GitOps homelab: local k3d cluster, Flux,
/// and the platform manifests it reconciles.
pub struct Cli {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full bootstrap pipeline: tools, cluster, Flux, manifests, readiness, health.
    ///
    /// This is the default when no subcommand is given. Creating the cluster
    /// and applying manifests is idempotent; a failure while resources are
    /// being created rolls back what this run added.
    Bootstrap {
        #[arg(long, help = "Keep partially created resources if bootstrap fails")]
        keep_on_failure: bool,
    },

    /// Check cluster, Flux, platform deployments, database, and endpoints once each.
    Health,

    /// Run smoke probes against the live stack (HTTP endpoints with retries, reconciliation state).
    Smoke,

    /// Delete the cluster and remove managed hosts-file aliases.
    Cleanup,

    /// Install any missing required CLI tools via their official installers.
    InstallTools,

    /// Show Flux and workload status.
    Status,

    /// Apply the manifest stages in dependency order, verifying each stage's preconditions.
    Apply,

    /// Trigger Flux reconciliation of the git source and the stage kustomizations.
    Reconcile,

    /// Scale the application deployment up or down.
    Scale {
        #[arg(value_enum)]
        direction: ScaleDirection,

        #[arg(
            short,
            long,
            help = "Explicit replica count (overrides the direction default)"
        )]
        replicas: Option<i32>,
    },

    /// Build the application container image, optionally pushing it to the registry.
    ///
    /// Images are tagged as <DOCKER_USERNAME>/<IMAGE_NAME>:<TAG> and :latest.
    Build {
        #[arg(long, help = "Push the built image to the registry")]
        push: bool,

        #[arg(
            long,
            value_name = "DIR",
            default_value = "phoenix-app",
            help = "Application build context directory"
        )]
        path: PathBuf,
    },

    /// Start or stop the docker-compose development environment.
    Dev {
        #[arg(value_enum)]
        action: DevAction,

        #[arg(
            long,
            value_name = "DIR",
            default_value = "phoenix-app",
            help = "Directory containing docker-compose.yml"
        )]
        path: PathBuf,
    },

    /// Manage hosts-file aliases for the ingress hostnames.
    Hosts {
        #[arg(value_enum)]
        action: HostsAction,
    },

    /// Scaffold the GitOps repository layout the pipeline expects.
    Init {
        #[arg(
            long,
            value_name = "DIR",
            default_value = ".",
            help = "Repository root to scaffold into"
        )]
        path: PathBuf,
    },

    /// Validate configuration and the manifest tree.
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ScaleDirection {
    Up,
    Down,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum DevAction {
    Up,
    Down,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum HostsAction {
    Show,
    Add,
    Remove,
}
