//! Image layout analysis.
//!
//! # Modules
//!
//! - [`mask`]: near-white thresholding into a foreground map
//! - [`band`]: row/column band detection by projection
//! - [`cell`]: icon/caption split inside one row × column cell
//! - [`order`]: reading order and label pairing

pub mod band;
pub mod cell;
pub mod mask;
pub mod order;

use std::path::Path;

use image::RgbaImage;
use serde::Serialize;

/// Axis-aligned half-open rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Open a raster file and convert it to RGBA.
pub fn load_rgba(path: &Path) -> image::ImageResult<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}
