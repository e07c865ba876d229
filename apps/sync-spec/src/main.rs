//! sync-spec CLI binary entry point.
//! Resolves settings, runs the sync and prints the performed actions.

use clap::Parser;
use sync_spec::cli::Cli;
use sync_spec::error::Result;
use sync_spec::models::SyncAction;
use sync_spec::sync::{self, SyncContext};
use sync_spec::{config, output, utils};
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let eff = config::resolve_effective(
        cli.repo_root.as_deref(),
        cli.tool_dir.as_deref(),
        cli.output.as_deref(),
    );
    match run(&eff) {
        Ok(actions) => output::print_sync(&actions, &eff.output),
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(eff: &config::Effective) -> Result<Vec<SyncAction>> {
    tracing::debug!(
        repo_root = %eff.repo_root.display(),
        tool_dir = %eff.tool_dir.display(),
        "resolved settings"
    );
    let ctx = SyncContext::initialize(&eff.tool_dir, &eff.repo_root)?;
    sync::run_sync(&ctx)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .with_ansi(utils::stderr_colors())
        .init();
}
