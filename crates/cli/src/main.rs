use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod discovery;
mod output;

/// pack.lua - declarative build pipeline planner
#[derive(Parser)]
#[command(name = "pack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve a config into an execution plan and print it
  Plan {
    /// Path to the configuration file (default: pack.lua)
    #[arg(default_value = "pack.lua")]
    config: PathBuf,

    /// Build mode (development or production)
    #[arg(short, long, default_value = "development")]
    mode: String,

    /// Print the resolved plan as JSON
    #[arg(long)]
    json: bool,

    /// Discover sources under this root and show per-file chain assignments
    #[arg(long)]
    root: Option<PathBuf>,
  },

  /// Validate a config without printing the full plan
  Check {
    /// Path to the configuration file (default: pack.lua)
    #[arg(default_value = "pack.lua")]
    config: PathBuf,

    /// Check a single mode instead of both
    #[arg(short, long)]
    mode: Option<String>,
  },

  /// Show the stage chain a file would be assigned
  Explain {
    /// The file path to explain
    file: PathBuf,

    /// Path to the configuration file (default: pack.lua)
    #[arg(short, long, default_value = "pack.lua")]
    config: PathBuf,

    /// Build mode (development or production)
    #[arg(short, long, default_value = "development")]
    mode: String,
  },

  /// Write a starter pack.lua
  Init {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    dir: PathBuf,
  },
}

fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Plan {
      config,
      mode,
      json,
      root,
    } => cmd::cmd_plan(&config, &mode, json, root.as_deref(), cli.verbose),
    Commands::Check { config, mode } => cmd::cmd_check(&config, mode.as_deref()),
    Commands::Explain { file, config, mode } => cmd::cmd_explain(&file, &config, &mode),
    Commands::Init { dir } => cmd::cmd_init(&dir),
  }
}
