//! `[[jobs]]` entries: one screenshot and its labels each.
//!
//! # Example
//!
//! ```toml
//! [[jobs]]
//! path = "shots/features.png"     # Screenshot (relative to config dir, `~` allowed)
//! grid = { cols = 3, rows = 2 }   # Optional: expected layout, cross-checked
//! names = ["Multi-Platform Delivery", "AI-First Architecture", "10x Performance",
//!          "Git-Native Workflows", "Multi-Industry Compliance", "Enterprise Analytics"]
//! output = "icons/features"       # Optional: overrides top-level `output`
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::slug::slugify;

/// Expected icon grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub cols: u32,
    pub rows: u32,
}

impl GridShape {
    pub const fn cells(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub path: PathBuf,

    #[serde(default)]
    pub grid: Option<GridShape>,

    /// Labels in reading order (left to right, top to bottom).
    pub names: Vec<String>,

    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl JobConfig {
    /// Short name used in logs and by `--only`: the screenshot's file stem.
    pub fn label(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Output directory for this job, falling back to `default`.
    pub fn output_dir<'a>(&'a self, default: &'a Path) -> &'a Path {
        self.output.as_deref().unwrap_or(default)
    }

    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if self.names.is_empty() {
            diag.error(
                FieldPath::new(format!("jobs[{index}].names")),
                "at least one name is required",
            );
        }

        for (i, name) in self.names.iter().enumerate() {
            if slugify(name).is_empty() {
                diag.error_with_hint(
                    FieldPath::new(format!("jobs[{index}].names[{i}]")),
                    format!("`{name}` has no usable file name characters"),
                    "use at least one letter or digit",
                );
            }
        }

        if let Some(grid) = self.grid {
            if grid.cols == 0 || grid.rows == 0 {
                diag.error(
                    FieldPath::new(format!("jobs[{index}].grid")),
                    "grid dimensions must be positive",
                );
            } else if grid.cells() != self.names.len() {
                diag.error_with_hint(
                    FieldPath::new(format!("jobs[{index}].grid")),
                    format!(
                        "{}x{} grid has {} cells but {} names are listed",
                        grid.cols,
                        grid.rows,
                        grid.cells(),
                        self.names.len()
                    ),
                    "list one name per icon, in reading order",
                );
            }
        }
    }
}

/// Report labels of different jobs (or the same job) that would write the same file.
pub fn validate_unique_outputs(jobs: &[JobConfig], default: &Path, diag: &mut ConfigDiagnostics) {
    let mut seen: HashMap<(PathBuf, String), (usize, usize)> = HashMap::new();

    for (job_idx, job) in jobs.iter().enumerate() {
        let dir = job.output_dir(default).to_path_buf();
        for (name_idx, name) in job.names.iter().enumerate() {
            let slug = slugify(name);
            if slug.is_empty() {
                continue;
            }
            if let Some((first_job, first_name)) =
                seen.insert((dir.clone(), slug.clone()), (job_idx, name_idx))
            {
                diag.error_with_hint(
                    FieldPath::new(format!("jobs[{job_idx}].names[{name_idx}]")),
                    format!("`{name}` writes `{slug}.svg`, already written by another label"),
                    format!("conflicts with jobs[{first_job}].names[{first_name}]"),
                );
            }
        }
    }
}
