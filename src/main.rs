//! iconcut - extract icon tiles from grid screenshots into svg files.

#![allow(dead_code)]

mod cli;
mod config;
mod export;
mod extract;
mod image;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::IconConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Init { force, dry } => cli::init::new_config(&cli.config, *force, *dry),
        Commands::Extract { args } => {
            let config = IconConfig::load(&cli)?;
            cli::extract::run_extract(&config, args)
        }
        Commands::Inspect { args } => {
            let config = IconConfig::load(&cli)?;
            cli::inspect::run_inspect(&config, args)
        }
    }
}
