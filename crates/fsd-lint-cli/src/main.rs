//! fsd-lint CLI tool.
//!
//! Usage:
//! ```bash
//! fsd-lint check [OPTIONS] [PATH]
//! fsd-lint layers [PATH]
//! fsd-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Feature-Sliced Design structure and layer dependency checker
#[derive(Parser)]
#[command(name = "fsd-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze structure and dependencies
    Check {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write fsd_structure.json into this directory (relative paths are resolved against PATH)
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Exit with status 0 even when cyclical dependencies are found
        #[arg(long)]
        no_fail: bool,

        /// Extra directory names to skip (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Print the effective layer order and segment names
    Layers {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per cyclical dependency.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            export,
            no_fail,
            exclude,
        } => commands::check::run(&commands::check::CheckOptions {
            path,
            format,
            export,
            no_fail,
            exclude,
            config: cli.config,
        }),
        Commands::Layers { path } => commands::layers::run(&path, cli.config.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
