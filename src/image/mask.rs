use image::RgbaImage;
use rayon::prelude::*;

use crate::image::Rect;

/// Images with at least this many pixels are classified in parallel.
const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

/// Binary foreground map with the same dimensions as its source image.
///
/// Stored row-major; `true` marks a pixel that is darker than the
/// near-white cutoff on at least one color channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl ForegroundMask {
    /// Build a mask where a pixel is foreground if any of R, G, B is below `cutoff`.
    ///
    /// Alpha is ignored: a fully transparent black pixel still counts as dark.
    pub fn from_image(img: &RgbaImage, cutoff: u8) -> Self {
        let (width, height) = img.dimensions();
        let len = width as usize * height as usize;
        let mut bits = vec![false; len];
        let raw = img.as_raw();

        if len >= PARALLEL_PIXEL_THRESHOLD {
            bits.par_iter_mut()
                .zip(raw.par_chunks_exact(4))
                .for_each(|(bit, pixel)| *bit = is_foreground(pixel, cutoff));
        } else {
            for (bit, pixel) in bits.iter_mut().zip(raw.chunks_exact(4)) {
                *bit = is_foreground(pixel, cutoff);
            }
        }

        Self {
            width,
            height,
            bits,
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Foreground count of every row (length = height).
    pub fn row_counts(&self) -> Vec<u32> {
        self.row_counts_in(self.full())
    }

    /// Foreground count of every column (length = width).
    pub fn column_counts(&self) -> Vec<u32> {
        let mut counts = vec![0_u32; self.width as usize];
        for row in self.bits.chunks_exact(self.width.max(1) as usize) {
            for (count, &bit) in counts.iter_mut().zip(row) {
                *count += u32::from(bit);
            }
        }
        counts
    }

    /// Per-row foreground counts restricted to `rect` (length = rect height).
    ///
    /// `rect` must lie inside the mask.
    pub fn row_counts_in(&self, rect: Rect) -> Vec<u32> {
        (rect.top..rect.bottom)
            .map(|y| {
                let start = y as usize * self.width as usize;
                self.bits[start + rect.left as usize..start + rect.right as usize]
                    .iter()
                    .filter(|&&bit| bit)
                    .count() as u32
            })
            .collect()
    }

    /// Whether any pixel inside `rect` is foreground.
    pub fn any_in(&self, rect: Rect) -> bool {
        self.row_counts_in(rect).iter().any(|&count| count > 0)
    }

    /// Rectangle covering the whole mask.
    pub const fn full(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

#[inline]
fn is_foreground(pixel: &[u8], cutoff: u8) -> bool {
    pixel[0] < cutoff || pixel[1] < cutoff || pixel[2] < cutoff
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn white_pixel_is_background() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let mask = ForegroundMask::from_image(&img, 240);
        assert!(!mask.any_in(mask.full()));
    }

    #[test]
    fn single_dark_channel_is_foreground() {
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([255, 239, 255, 255]));

        let mask = ForegroundMask::from_image(&img, 240);
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
    }

    #[test]
    fn cutoff_is_exclusive() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([240, 240, 240, 255]));
        let mask = ForegroundMask::from_image(&img, 240);
        assert!(!mask.get(0, 0));
    }

    #[test]
    fn alpha_is_ignored() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let mask = ForegroundMask::from_image(&img, 240);
        assert!(mask.get(0, 0));
    }

    #[test]
    fn counts_along_both_axes() {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 255]));
        for x in 0..3 {
            img.put_pixel(x, 1, Rgba([10, 10, 10, 255]));
        }
        img.put_pixel(3, 2, Rgba([10, 10, 10, 255]));

        let mask = ForegroundMask::from_image(&img, 240);
        assert_eq!(mask.row_counts(), vec![0, 3, 1]);
        assert_eq!(mask.column_counts(), vec![1, 1, 1, 1]);
        assert_eq!(mask.row_counts_in(Rect::new(1, 1, 4, 3)), vec![2, 1]);
    }

    #[test]
    fn parallel_path_matches_sequential() {
        // 256 x 256 crosses the parallel threshold
        let mut img = RgbaImage::from_pixel(256, 256, Rgba([255, 255, 255, 255]));
        for y in 100..150 {
            for x in 20..60 {
                img.put_pixel(x, y, Rgba([20, 30, 90, 255]));
            }
        }

        let mask = ForegroundMask::from_image(&img, 240);
        let total: u32 = mask.row_counts().iter().sum();
        assert_eq!(total, 50 * 40);
        assert!(mask.get(20, 100));
        assert!(!mask.get(60, 100));
    }
}
