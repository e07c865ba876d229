//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sync-spec",
    version,
    about = "Sync rspec scaffolding into the current repository",
    long_about = "sync-spec — copy a repo type's skeleton and render its spec templates into the current repository.\n\nThe repository is identified by its 'origin' remote URL, which selects a record in sync_spec.yml inside the tool directory.",
    after_help = "Examples:\n  sync-spec\n  sync-spec --tool-dir /opt/sync-spec --output json\n  SYNC_SPEC_HOME=/opt/sync-spec sync-spec --repo-root ../puppet-nginx"
)]
/// Top-level CLI options. With no arguments the current directory is synced.
pub struct Cli {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(
        long,
        env = "SYNC_SPEC_HOME",
        help = "Directory holding sync_spec.yml, skeletons and templates (default: executable's dir)"
    )]
    pub tool_dir: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
}
