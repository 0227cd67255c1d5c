//! Icon export: crop, encode and write `<slug>.svg` files.

pub mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops;
use thiserror::Error;

use crate::image::Rect;
use crate::utils::slug::slugify;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode `{name}` as png")]
    Encode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Output path for a label inside `output_dir`.
pub fn icon_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}.svg", slugify(name)))
}

/// Crop `bounds` from the color image and write it as an SVG named after `name`.
///
/// Creates `output_dir` if needed. Returns the written path.
pub fn write_icon(
    img: &RgbaImage,
    bounds: Rect,
    name: &str,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let icon = crop(img, bounds);
    let content = svg::icon_to_svg(&icon).map_err(|source| ExportError::Encode {
        name: name.to_string(),
        source,
    })?;

    fs::create_dir_all(output_dir).map_err(|e| ExportError::Write(output_dir.to_path_buf(), e))?;
    let path = icon_path(output_dir, name);
    fs::write(&path, content).map_err(|e| ExportError::Write(path.clone(), e))?;
    Ok(path)
}

/// Copy the `bounds` region out of `img`.
pub fn crop(img: &RgbaImage, bounds: Rect) -> RgbaImage {
    imageops::crop_imm(img, bounds.left, bounds.top, bounds.width(), bounds.height()).to_image()
}
