//! Starter configuration file generation.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::DetectConfig;

/// Generate iconcut.toml content with comments
pub fn generate_config_template() -> String {
    let detect = DetectConfig::default();
    let mut out = String::new();

    out.push_str(&format!(
        "# iconcut configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    out.push_str("# Directory receiving <slug>.svg files (relative to this file)\n");
    out.push_str("output = \"icons\"\n\n");

    out.push_str("# Layout heuristic thresholds\n");
    out.push_str("[detect]\n");
    out.push_str(&format!(
        "cutoff = {}                 # Channel value below which a pixel is dark\n",
        detect.cutoff
    ));
    out.push_str(&format!(
        "row_density = {:?}           # Share of width a row band must exceed\n",
        detect.row_density
    ));
    out.push_str(&format!(
        "column_density = {:?}       # Share of height a column band must exceed\n",
        detect.column_density
    ));
    out.push_str(&format!(
        "min_span = {}                # Bands must be longer than this (pixels)\n",
        detect.min_span
    ));
    out.push_str(&format!(
        "gap_density = {:?}           # Caption gap: rows sparser than this share of cell width\n",
        detect.gap_density
    ));
    out.push_str(&format!(
        "row_tolerance = {:?}        # Max center distance for cells in one row\n",
        detect.row_tolerance
    ));
    out.push_str(&format!(
        "close_trailing_band = {}  # Keep bands that run into the image edge\n\n",
        detect.close_trailing_band
    ));

    out.push_str("# One table per screenshot; names are listed in reading order\n");
    out.push_str("[[jobs]]\n");
    out.push_str("path = \"screenshots/icons.png\"\n");
    out.push_str("grid = { cols = 2, rows = 2 }\n");
    out.push_str(
        "names = [\"Systems Engineering\", \"Model-Based Engineering\", \"Functional Safety\", \"Tool Development\"]\n",
    );

    out
}

/// Write the starter configuration to `path`
pub fn write_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }

    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_template_round_trips_defaults() {
        let config = test_parse_config(&generate_config_template());
        assert_eq!(config.detect, DetectConfig::default());
        assert_eq!(config.jobs.len(), 1);
        assert!(config.validate().is_ok());
    }
}
