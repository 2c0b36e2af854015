use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_version_guard::cli::{run_check, CheckArgs};
use git_version_guard::config;
use git_version_guard::ui;

/// Exit code for a branch/version combination that violates the policy
const EXIT_VIOLATION: i32 = 1;
/// Exit code for unusable configuration, manifest or repository
const EXIT_SETUP_ERROR: i32 = 2;

#[derive(clap::Parser)]
#[command(
    name = "git-version-guard",
    about = "Check that the project version is consistent with the current git branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Branch name to check (overrides the environment)")]
    branch: Option<String>,

    #[arg(long, help = "Environment variable holding the branch name")]
    branch_env: Option<String>,

    #[arg(short, long, help = "Project version to check (overrides the manifest)")]
    project_version: Option<String>,

    #[arg(short, long, help = "Build descriptor to read the project version from")]
    manifest: Option<String>,

    #[arg(long, help = "Read the branch from the local repository if the environment has none")]
    detect_branch: bool,

    #[arg(long, help = "Show the effective branch rules and exit")]
    list: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-version-guard {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(args.debug);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(EXIT_SETUP_ERROR);
        }
    };

    if args.list {
        ui::display_rules(&config.rules, &config.snapshot);
        return Ok(());
    }

    let check_args = CheckArgs {
        branch: args.branch,
        branch_env: args.branch_env,
        project_version: args.project_version,
        manifest_path: args.manifest,
        detect_branch: args.detect_branch,
    };

    let outcome = match run_check(&check_args, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(EXIT_SETUP_ERROR);
        }
    };

    ui::display_outcome(&outcome);

    if outcome.verdict.is_failure() {
        std::process::exit(EXIT_VIOLATION);
    }

    Ok(())
}
