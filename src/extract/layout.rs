//! Detection half of a job: mask, bands, cells and reading order.

use image::RgbaImage;
use serde::Serialize;

use crate::config::DetectConfig;
use crate::debug;
use crate::image::band::{Axis, Band, detect_bands};
use crate::image::cell::{Cell, split_cell};
use crate::image::mask::ForegroundMask;
use crate::image::order::reading_order;

/// Everything detected in one screenshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// No pixel is darker than the cutoff.
    pub blank: bool,
    pub rows: Vec<Band>,
    pub columns: Vec<Band>,
    /// Cells in reading order.
    pub cells: Vec<Cell>,
}

/// Detect the icon grid of `img`.
pub fn detect_layout(img: &RgbaImage, detect: &DetectConfig) -> Layout {
    let mask = ForegroundMask::from_image(img, detect.cutoff);
    let blank = !mask.any_in(mask.full());

    let rows = detect_bands(&mask, Axis::Row, detect.band_params(Axis::Row));
    let columns = detect_bands(&mask, Axis::Column, detect.band_params(Axis::Column));
    debug!("detect"; "{} row band(s) {:?}, {} column band(s) {:?}",
        rows.len(), rows, columns.len(), columns);

    let cells: Vec<Cell> = rows
        .iter()
        .flat_map(|&row| columns.iter().map(move |&column| (row, column)))
        .filter_map(|(row, column)| split_cell(&mask, row, column, detect.gap_density))
        .collect();

    Layout {
        width: img.width(),
        height: img.height(),
        blank,
        cells: reading_order(cells, detect.row_tolerance),
        rows,
        columns,
    }
}
