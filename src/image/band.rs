//! Row and column band detection by projection.
//!
//! The mask is projected onto one axis (foreground count per row or per
//! column) and the resulting profile is scanned for runs that stay above a
//! density threshold for longer than a minimum span.

use serde::Serialize;

use crate::debug;
use crate::image::mask::ForegroundMask;

/// Projection axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal bands: one count per image row.
    Row,
    /// Vertical bands: one count per image column.
    Column,
}

impl Axis {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Half-open index range `[start, end)` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub start: u32,
    pub end: u32,
}

impl Band {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }
}

/// Band scan parameters for one axis.
#[derive(Debug, Clone, Copy)]
pub struct BandParams {
    /// Fraction of the orthogonal dimension a count must exceed.
    pub density: f32,
    /// A band is kept only if it is strictly longer than this.
    pub min_span: u32,
    /// Close a band still open at the end of the scan instead of dropping it.
    pub close_trailing: bool,
}

/// Detect bands of `mask` along `axis`.
pub fn detect_bands(mask: &ForegroundMask, axis: Axis, params: BandParams) -> Vec<Band> {
    let (counts, across) = match axis {
        Axis::Row => (mask.row_counts(), mask.width()),
        Axis::Column => (mask.column_counts(), mask.height()),
    };
    let threshold = across as f32 * params.density;
    let scan = scan_profile(&counts, threshold, params.min_span);

    if let Some(open) = scan.trailing {
        if params.close_trailing && open.len() > params.min_span {
            debug!("detect"; "closing trailing {} band {}..{}", axis.name(), open.start, open.end);
            let mut bands = scan.bands;
            bands.push(open);
            return bands;
        }
        debug!("detect"; "dropped trailing {} band {}..{} (still open at image edge)",
            axis.name(), open.start, open.end);
    }

    scan.bands
}

/// Result of scanning one projection profile.
#[derive(Debug, Default, PartialEq, Eq)]
struct ProfileScan {
    bands: Vec<Band>,
    /// Run that was still above threshold when the profile ended.
    trailing: Option<Band>,
}

fn scan_profile(counts: &[u32], threshold: f32, min_span: u32) -> ProfileScan {
    let mut scan = ProfileScan::default();
    let mut open: Option<u32> = None;

    for (idx, &count) in counts.iter().enumerate() {
        let idx = idx as u32;
        if count as f32 > threshold {
            open.get_or_insert(idx);
        } else if let Some(start) = open.take()
            && idx - start > min_span
        {
            scan.bands.push(Band::new(start, idx));
        }
    }

    scan.trailing = open.map(|start| Band::new(start, counts.len() as u32));
    scan
}
