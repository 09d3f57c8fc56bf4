use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atif")]
#[command(about = "Convert coding-agent event logs into ATIF trajectories", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a captured agent log into a trajectory
    Convert {
        /// JSON-lines log captured from the agent
        log: PathBuf,

        /// Write the trajectory here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Post-run processing of a harness logs directory
    Populate {
        /// Directory holding command-0/stdout.txt
        #[arg(long)]
        logs_dir: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Check a trajectory file against its invariants
    Validate {
        trajectory: PathBuf,
    },
}

/// Run metadata, layered over the config file
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Model identifier in provider/model form
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub agent_name: Option<String>,

    #[arg(long)]
    pub agent_version: Option<String>,

    /// TOML config file (defaults to $ATIF_CONFIG or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
