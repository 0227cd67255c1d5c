//! Configuration management for `iconcut.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── detect     # [detect]
//! │   └── job        # [[jobs]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # IconConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! output = "src/assets/icons"
//!
//! [detect]
//! row_density = 0.1
//!
//! [[jobs]]
//! path = "shots/services.png"
//! grid = { cols = 2, rows = 2 }
//! names = ["Systems Engineering", "Model-Based Engineering",
//!          "Functional Safety", "Tool Development"]
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{DetectConfig, GridShape, JobConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::path::{normalize_path, resolve_config_path},
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default output directory, relative to the config file.
const DEFAULT_OUTPUT: &str = "icons";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing iconcut.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Directory receiving `<slug>.svg` files
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Layout heuristic thresholds
    #[serde(default)]
    pub detect: DetectConfig,

    /// Screenshots to process, in order
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            output: default_output(),
            detect: DetectConfig::default(),
            jobs: Vec::new(),
        }
    }
}

impl IconConfig {
    /// Load configuration for a non-init command.
    ///
    /// Searches upward from cwd for the config file; relative paths inside it
    /// resolve against the file's directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file `{}` not found, run `iconcut init` to create one",
                cli.config.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve paths against the config directory and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = root;

        if let Commands::Extract { args } = &cli.command {
            crate::logger::set_verbose(args.verbose);
            if let Some(output) = &args.output {
                // CLI paths are relative to cwd, not the config file
                self.output = normalize_path(output);
                // `--output` wins over per-job `output`
                for job in &mut self.jobs {
                    job.output = None;
                }
            }
        } else if let Commands::Inspect { args } = &cli.command {
            crate::logger::set_verbose(args.verbose);
        }

        self.normalize_paths();
    }

    /// Normalize all paths relative to the config directory.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.output = resolve_config_path(&self.output, &root);
        for job in &mut self.jobs {
            job.path = resolve_config_path(&job.path, &root);
            if let Some(output) = job.output.take() {
                job.output = Some(resolve_config_path(&output, &root));
            }
        }
    }

    /// Get the config directory
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Jobs selected by `--only` (all jobs when `only` is empty).
    ///
    /// Matches a job's label (file stem) or its resolved path.
    pub fn selected_jobs<'a>(&'a self, only: &'a [String]) -> impl Iterator<Item = &'a JobConfig> {
        self.jobs.iter().filter(move |job| {
            only.is_empty()
                || only
                    .iter()
                    .any(|o| *o == job.label() || Path::new(o) == job.path)
        })
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if self.jobs.is_empty() {
            diag.error_with_hint(
                FieldPath::new("jobs"),
                "no jobs configured",
                "add a [[jobs]] table with `path` and `names`",
            );
        }

        self.detect.validate(&mut diag);
        for (idx, job) in self.jobs.iter().enumerate() {
            job.validate(idx, &mut diag);
        }
        section::validate_unique_outputs(&self.jobs, &self.output, &mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> IconConfig {
    let (parsed, ignored) = IconConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
