//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use store_review_monitor::output::OutputMode;

/// store-review - App Store / Google Play review status monitor
#[derive(Parser, Debug)]
#[command(
    name = "store-review",
    version,
    about = "App Store / Google Play review status monitor",
    long_about = "Compare the latest store review status with the previous run.\n\n\
                  A notification record is emitted when the version or build changed,\n\
                  or a rejection was resolved, and the new status is worth telling\n\
                  someone about. The snapshot is updated on every run."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./store-review.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one monitoring pass
    Run {
        /// Observation document written by the store fetchers
        #[arg(short, long)]
        observations: PathBuf,

        /// Snapshot file (overrides config)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Notification outbox file, or '-' for stdout (overrides config)
        #[arg(long)]
        outbox: Option<PathBuf>,

        /// Step outputs file to merge results into (overrides config)
        #[arg(long)]
        outputs: Option<PathBuf>,

        /// Retention for unobserved platforms: carry_forward, drop (overrides config)
        #[arg(long)]
        retention: Option<String>,
    },

    /// Inspect or reset the stored snapshot
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },

    /// Classify a status transition without touching the snapshot
    Classify {
        /// Platform: app-store, google-play
        #[arg(short, long)]
        platform: String,

        /// Current status
        #[arg(short, long)]
        status: String,

        /// Previous status
        #[arg(long)]
        previous_status: Option<String>,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum SnapshotAction {
    /// Show the stored snapshot
    Show {
        /// Snapshot file (overrides config)
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// Delete the stored snapshot so the next run starts cold
    Clear {
        /// Snapshot file (overrides config)
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Run {
            observations,
            cache,
            outbox,
            outputs,
            retention,
        }) => commands::run(
            cli.config.as_deref(),
            &commands::RunArgs {
                observations,
                cache,
                outbox,
                outputs,
                retention,
            },
            output_mode,
        ),
        Some(Command::Snapshot { action }) => {
            commands::snapshot_cmd(cli.config.as_deref(), action, output_mode)
        },
        Some(Command::Classify {
            platform,
            status,
            previous_status,
        }) => commands::classify(&platform, &status, previous_status.as_deref(), output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("store-review v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("store-review v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'store-review --help' for usage");
                println!("Run 'store-review run --observations <file>' to check once");
            }
            Ok(())
        },
    }
}
