mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use launchpad_core::LaunchpadError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "launchpad",
    about = "Bootstrap and lifecycle manager — provision the environment, gate startup on dependencies, administer database state",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .env or .git/)
    #[arg(long, global = true, env = "LAUNCHPAD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision if needed, wait for dependencies, then exec the service
    Up {
        /// Seconds to wait for each dependency endpoint
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Suppress gating progress output
        #[arg(long)]
        quiet: bool,

        /// Service program and arguments, after `--`
        #[arg(required = true, last = true)]
        argv: Vec<String>,
    },

    /// Create the persisted environment configuration if missing
    Provision,

    /// Show database schema and seed status
    Status,

    /// Drop and recreate the database schema (destroys all data)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Insert fixture data (all, users, beatmaps, queues, requests)
    Seed { target: String },

    /// Reset then seed, as one operation
    Fresh {
        target: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Up {
            timeout_secs,
            quiet,
            argv,
        } => cmd::up::run(&root, timeout_secs, quiet, &argv),
        Commands::Provision => cmd::provision::run(&root),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Reset { yes } => cmd::reset::run(&root, yes),
        Commands::Seed { target } => cmd::seed::run(&root, &target, cli.json),
        Commands::Fresh { target, yes } => cmd::fresh::run(&root, &target, yes, cli.json),
    };

    if let Err(e) = result {
        // A declined confirmation is a clean abort, not a failure chain.
        if matches!(
            e.downcast_ref::<LaunchpadError>(),
            Some(LaunchpadError::Declined)
        ) {
            eprintln!("aborted");
            std::process::exit(1);
        }
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
