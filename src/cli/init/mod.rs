//! Config initialization.
//!
//! Writes a commented `iconcut.toml` starter file.

mod config;

use crate::log;
use anyhow::{Result, bail};
use std::path::Path;

pub use config::generate_config_template;

/// Write the starter config to `path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
/// If `dry_run` is true, only prints the template to stdout.
pub fn new_config(path: &Path, force: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    if path.exists() && !force {
        bail!(
            "`{}` already exists, pass --force to overwrite it",
            path.display()
        );
    }

    config::write_config(path)?;
    log!("init"; "wrote {}", path.display());
    Ok(())
}
