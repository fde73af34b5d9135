use clap::Parser;
use simplelog::*;

use phoenixctl::cli::{Cli, Commands};
use phoenixctl::commands;

fn main() {
    let cli = Cli::parse();

    setup_logging(&cli.verbose);

    debug!("args: {:?}", cli);

    // no subcommand runs the full bootstrap, like the old bootstrap.sh default
    let command = cli.command.unwrap_or(Commands::Bootstrap {
        keep_on_failure: false,
    });

    // dispatch commands
    match &command {
        Commands::Bootstrap { keep_on_failure } => commands::bootstrap::run(keep_on_failure),

        Commands::Health => commands::health::run(),

        Commands::Smoke => commands::smoke::run(),

        Commands::Cleanup => commands::cleanup::run(),

        Commands::InstallTools => commands::install_tools::run(),

        Commands::Status => commands::status::run(),

        Commands::Apply => commands::apply::run(),

        Commands::Reconcile => commands::reconcile::run(),

        Commands::Scale {
            direction,
            replicas,
        } => commands::scale::run(direction, replicas),

        Commands::Build { push, path } => commands::build::run(push, path),

        Commands::Dev { action, path } => commands::dev::run(action, path),

        Commands::Hosts { action } => commands::hosts::run(action),

        Commands::Init { path } => commands::init::run(path),

        Commands::Validate => commands::validate::run(),
    }
}

fn setup_logging(verbose: &clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>) {
    let log_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Trace)
        .build();

    TermLogger::init(
        verbose.log_level_filter(),
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();
}
