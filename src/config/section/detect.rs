//! `[detect]` section configuration.
//!
//! Thresholds for the layout heuristic. Every field is optional.
//!
//! # Example
//!
//! ```toml
//! [detect]
//! cutoff = 240                # Channel value below which a pixel is dark
//! row_density = 0.1           # Row band: dark pixels must exceed this share of width
//! column_density = 0.05       # Column band: dark pixels must exceed this share of height
//! min_span = 50               # Bands must be strictly longer than this (pixels)
//! gap_density = 0.1           # Caption gap: rows below this share of cell width
//! row_tolerance = 50.0        # Max center distance for cells in one visual row
//! close_trailing_band = false # Keep a band that runs into the image edge
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::image::band::{Axis, BandParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Near-white cutoff for any of the R, G, B channels.
    pub cutoff: u8,

    pub row_density: f32,

    pub column_density: f32,

    /// Minimum band length (exclusive), shared by both axes.
    pub min_span: u32,

    /// Rows sparser than this share of the cell width count as a gap.
    pub gap_density: f32,

    /// Vertical distance (pixels) under which cells share a row.
    pub row_tolerance: f32,

    /// Close a band still open at the image edge instead of dropping it.
    ///
    /// Off by default: the heuristic was tuned on screenshots whose icon
    /// grid never touches the bottom or right edge.
    pub close_trailing_band: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            cutoff: 240,
            row_density: 0.1,
            column_density: 0.05,
            min_span: 50,
            gap_density: 0.1,
            row_tolerance: 50.0,
            close_trailing_band: false,
        }
    }
}

impl DetectConfig {
    /// Band scan parameters for `axis`.
    pub fn band_params(&self, axis: Axis) -> BandParams {
        let density = match axis {
            Axis::Row => self.row_density,
            Axis::Column => self.column_density,
        };
        BandParams {
            density,
            min_span: self.min_span,
            close_trailing: self.close_trailing_band,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let fractions = [
            ("detect.row_density", self.row_density),
            ("detect.column_density", self.column_density),
            ("detect.gap_density", self.gap_density),
        ];
        for (field, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                diag.error_with_hint(
                    FieldPath::new(field),
                    format!("must be within (0, 1], got {value}"),
                    "densities are fractions of the image or cell size",
                );
            }
        }

        if self.cutoff == 0 {
            diag.error(
                FieldPath::new("detect.cutoff"),
                "a cutoff of 0 marks no pixel as dark",
            );
        }

        if self.min_span == 0 {
            diag.error_with_hint(
                FieldPath::new("detect.min_span"),
                "must be at least 1",
                "a zero span keeps single-pixel bands such as caption lines",
            );
        }

        // zero would put every cell in its own row
        if !(self.row_tolerance > 0.0) {
            diag.error(
                FieldPath::new("detect.row_tolerance"),
                format!("must be positive, got {}", self.row_tolerance),
            );
        }
    }
}
