//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Extract icon tiles from grid screenshots into svg files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconcut.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "iconcut.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a starter config file
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,

        /// Print the template to stdout instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Detect icons and write one svg per label
    #[command(visible_alias = "x")]
    Extract {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Print detected bands and cells as JSON without writing files
    #[command(visible_alias = "n")]
    Inspect {
        #[command(flatten)]
        args: InspectArgs,
    },
}

/// Extract command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Only run jobs whose screenshot file stem (or path) matches
    #[arg(long, value_name = "JOB")]
    pub only: Vec<String>,

    /// Output directory, overriding `output` in the config (relative to cwd)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Report what would be written without touching the file system
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Inspect command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Only inspect jobs whose screenshot file stem (or path) matches
    #[arg(long, value_name = "JOB")]
    pub only: Vec<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
