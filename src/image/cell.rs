use serde::Serialize;

use crate::image::Rect;
use crate::image::band::Band;
use crate::image::mask::ForegroundMask;

/// One detected icon tile in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub bounds: Rect,
    pub center_x: f32,
    pub center_y: f32,
}

/// Refine the intersection of `row` and `column` down to its icon block.
///
/// Returns `None` when the intersection holds no foreground at all. Scanning
/// from the top, the first sparse row (below `gap_density` of the crop width)
/// that follows a dense row marks where the caption begins; the cell is cut
/// there. Without such a gap the cell keeps the full row band height.
pub fn split_cell(
    mask: &ForegroundMask,
    row: Band,
    column: Band,
    gap_density: f32,
) -> Option<Cell> {
    let crop = Rect::new(column.start, row.start, column.end, row.end);
    if !mask.any_in(crop) {
        return None;
    }

    let counts = mask.row_counts_in(crop);
    let icon_bottom = icon_bottom(&counts, crop.width() as f32 * gap_density);

    let bounds = Rect::new(crop.left, crop.top, crop.right, crop.top + icon_bottom);
    Some(Cell {
        bounds,
        center_x: crop.left as f32 + crop.width() as f32 / 2.0,
        center_y: crop.top as f32 + icon_bottom as f32 / 2.0,
    })
}

/// Height of the leading dense block in a per-row count profile.
fn icon_bottom(counts: &[u32], gap_threshold: f32) -> u32 {
    let mut in_block = false;
    for (idx, &count) in counts.iter().enumerate() {
        if (count as f32) < gap_threshold {
            if in_block {
                return idx as u32;
            }
        } else {
            in_block = true;
        }
    }
    counts.len() as u32
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const NAVY: Rgba<u8> = Rgba([20, 30, 80, 255]);

    fn fill(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, NAVY);
            }
        }
    }

    #[test]
    fn empty_intersection_yields_nothing() {
        let img = RgbaImage::from_pixel(100, 100, WHITE);
        let mask = ForegroundMask::from_image(&img, 240);
        assert!(split_cell(&mask, Band::new(0, 100), Band::new(0, 100), 0.1).is_none());
    }

    #[test]
    fn caption_below_icon_is_cut_off() {
        let mut img = RgbaImage::from_pixel(100, 140, WHITE);
        // icon block rows 0..80, gap, caption line rows 90..95 (sparse)
        fill(&mut img, 10, 0, 90, 80);
        fill(&mut img, 40, 90, 45, 95);
        let mask = ForegroundMask::from_image(&img, 240);

        let cell = split_cell(&mask, Band::new(0, 140), Band::new(0, 100), 0.1).unwrap();
        assert_eq!(cell.bounds, Rect::new(0, 0, 100, 80));
        assert_eq!(cell.center_x, 50.0);
        assert_eq!(cell.center_y, 40.0);
    }

    #[test]
    fn leading_sparse_rows_do_not_end_the_icon() {
        let counts = [0, 0, 3, 50, 50, 50, 2, 40];
        assert_eq!(icon_bottom(&counts, 10.0), 6);
    }

    #[test]
    fn no_gap_keeps_full_band() {
        let counts = [50; 12];
        assert_eq!(icon_bottom(&counts, 10.0), 12);
        assert_eq!(icon_bottom(&[0, 0, 0], 10.0), 3);
    }

    #[test]
    fn offsets_are_in_image_coordinates() {
        let mut img = RgbaImage::from_pixel(300, 300, WHITE);
        fill(&mut img, 150, 100, 250, 200);
        let mask = ForegroundMask::from_image(&img, 240);

        let cell = split_cell(&mask, Band::new(100, 260), Band::new(150, 250), 0.1).unwrap();
        assert_eq!(cell.bounds, Rect::new(150, 100, 250, 200));
        assert_eq!(cell.center_x, 200.0);
        assert_eq!(cell.center_y, 150.0);
    }
}
