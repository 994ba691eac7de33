//! CLI definitions and entry point

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use super::commands;
use minutes_digest::config::Config;
use minutes_digest::output::OutputMode;
use minutes_digest::paths;

/// minutes-digest - Go proposal review status changes, week by week
#[derive(Parser, Debug)]
#[command(
    name = "minutes-digest",
    version,
    about = "Weekly digest of Go proposal review status changes",
    long_about = "Reads the proposal review meeting minutes posted on the tracking issue,\n\
                  extracts each proposal's status, and records the real transitions.\n\n\
                  Each run processes the comments added or edited since the previous run\n\
                  and writes a weekly digest plus one content file per proposal."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./minutes-digest.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch new minutes, reconcile statuses and write the digest
    Run {
        /// Read comments from a JSON export instead of the GitHub API
        #[arg(long)]
        comments_file: Option<PathBuf>,

        /// State file (overrides config)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Digest file (overrides config)
        #[arg(long)]
        digest: Option<PathBuf>,

        /// Per-proposal content directory (overrides config)
        #[arg(long)]
        content_dir: Option<PathBuf>,
    },

    /// Parse a minutes markdown file and print the status records
    Parse {
        /// Markdown file holding one comment body
        file: PathBuf,

        /// Comment timestamp (RFC3339), used in diagnostics
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,

        /// Also print how each line was classified
        #[arg(long)]
        explain: bool,
    },

    /// Show or reset the saved processing state
    State {
        /// Delete the state so the next run bootstraps
        #[arg(long)]
        reset: bool,

        /// State file (overrides config)
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,

    /// Show version
    Version,
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

    let config_path = cli.config.unwrap_or_else(paths::config_file);
    let mut config = Config::load(&config_path)?;

    match cli.command {
        Some(Command::Run {
            comments_file,
            state,
            digest,
            content_dir,
        }) => {
            if let Some(state) = state {
                config.output.state_file = state;
            }
            if let Some(digest) = digest {
                config.output.digest_file = digest;
            }
            if let Some(dir) = content_dir {
                config.output.content_dir = dir;
            }
            commands::run(&config, comments_file.as_deref(), output_mode)
        },
        Some(Command::Parse {
            file,
            timestamp,
            explain,
        }) => commands::parse(&file, timestamp, explain, output_mode),
        Some(Command::State { reset, state }) => {
            if let Some(state) = state {
                config.output.state_file = state;
            }
            commands::state(&config, reset, output_mode)
        },
        Some(Command::Config) => commands::show_config(&config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("minutes-digest v{}", env!("CARGO_PKG_VERSION"));
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
                println!("minutes-digest v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'minutes-digest --help' for usage");
                println!("Run 'minutes-digest run' to process new minutes");
            }
            Ok(())
        },
    }
}
