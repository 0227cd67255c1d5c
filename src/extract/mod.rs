//! One extraction job: screenshot in, `<slug>.svg` files out.
//!
//! ```text
//! load ─► mask ─► row/column bands ─► cells ─► reading order ─► pair names ─► export
//! ```
//!
//! Each job returns a typed [`JobReport`] or [`ExtractError`]; the caller
//! decides how to report it and moves on to the next job.

mod layout;

pub use layout::{Layout, detect_layout};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{DetectConfig, GridShape, JobConfig};
use crate::export::{ExportError, icon_path, write_icon};
use crate::image::load_rgba;
use crate::image::order::pair_names;
use crate::logger::ProgressLine;
use crate::{debug, log};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to load `{0}`")]
    Load(PathBuf, #[source] image::ImageError),

    #[error("no pixel darker than the cutoff in `{0}`")]
    Blank(PathBuf),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Outcome of a job that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub source: PathBuf,
    /// Cells found in the screenshot.
    pub detected: usize,
    /// Names listed for the job.
    pub expected: usize,
    /// Files written (or that would be written, on a dry run).
    pub outputs: Vec<PathBuf>,
    pub grid: Option<GridShape>,
    /// Detected `(columns, rows)` band counts.
    pub detected_grid: (usize, usize),
}

impl JobReport {
    pub const fn is_mismatch(&self) -> bool {
        self.detected != self.expected
    }

    /// Configured grid disagrees with the detected band counts.
    pub fn is_grid_mismatch(&self) -> bool {
        self.grid.is_some_and(|grid| {
            (grid.cols as usize, grid.rows as usize) != self.detected_grid
        })
    }
}

/// Run one job. With `dry_run`, nothing is written.
pub fn run_job(
    job: &JobConfig,
    detect: &DetectConfig,
    default_output: &Path,
    dry_run: bool,
) -> Result<JobReport, ExtractError> {
    let img = load_rgba(&job.path).map_err(|e| ExtractError::Load(job.path.clone(), e))?;
    debug!("extract"; "{} loaded, {}x{}", job.label(), img.width(), img.height());

    let layout = detect_layout(&img, detect);
    if layout.blank {
        return Err(ExtractError::Blank(job.path.clone()));
    }

    let pairing = pair_names(&layout.cells, &job.names);
    if pairing.is_mismatch() {
        log!("warning"; "found {} cells but expected {} for {}, exporting {}",
            pairing.detected, pairing.expected, job.path.display(), pairing.named.len());
    }

    let output_dir = job.output_dir(default_output);
    let mut outputs = Vec::with_capacity(pairing.named.len());

    if dry_run {
        for named in &pairing.named {
            let path = icon_path(output_dir, named.name);
            debug!("extract"; "would write {} from {:?}", path.display(), named.cell.bounds);
            outputs.push(path);
        }
    } else if !pairing.named.is_empty() {
        let progress = ProgressLine::new("export", &[("icons", pairing.named.len())]);
        for named in &pairing.named {
            outputs.push(write_icon(&img, named.cell.bounds, named.name, output_dir)?);
            progress.inc("icons");
        }
        progress.finish();
    }

    Ok(JobReport {
        source: job.path.clone(),
        detected: pairing.detected,
        expected: pairing.expected,
        outputs,
        grid: job.grid,
        detected_grid: (layout.columns.len(), layout.rows.len()),
    })
}


#[cfg(test)]
mod tests {
    use std::fs;

    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::fixtures::{TILE, fill, icon_grid, names, tile_origin};
    use super::*;
    use crate::export::svg::decode_payload;
    use crate::image::Rect;

    fn job_for(dir: &TempDir, img: &RgbaImage, names: Vec<String>, grid: Option<(u32, u32)>) -> JobConfig {
        let path = dir.path().join("shot.png");
        img.save(&path).unwrap();
        JobConfig {
            path,
            grid: grid.map(|(cols, rows)| GridShape { cols, rows }),
            names,
            output: None,
        }
    }

    fn svg_count(dir: &Path) -> usize {
        fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "svg"))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn layout_of_three_by_two_grid() {
        let layout = detect_layout(&icon_grid(3, 2), &DetectConfig::default());

        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.columns.len(), 3);
        assert_eq!(layout.cells.len(), 6);

        // reading order: row-major, captions excluded
        for (i, cell) in layout.cells.iter().enumerate() {
            let (x, y) = tile_origin(i as u32 % 3, i as u32 / 3);
            assert_eq!(cell.bounds, Rect::new(x, y, x + TILE, y + TILE), "cell {i}");
        }
    }

    #[test]
    fn shorter_tile_is_cut_at_its_gap() {
        let mut img = icon_grid(3, 1);
        // shrink the middle tile to 80 rows; its neighbours keep the band open
        let (x, y) = tile_origin(1, 0);
        fill(&mut img, x, y + 80, x + TILE, y + TILE, Rgba([255, 255, 255, 255]));

        let layout = detect_layout(&img, &DetectConfig::default());
        assert_eq!(layout.cells.len(), 3);
        assert_eq!(layout.cells[1].bounds, Rect::new(x, y, x + TILE, y + 80));
        assert_eq!(layout.cells[0].bounds.height(), TILE);
    }

    #[test]
    fn exports_six_icons_for_three_by_two() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        let job = job_for(&dir, &icon_grid(3, 2), names(6), Some((3, 2)));

        let report = run_job(&job, &DetectConfig::default(), &out, false).unwrap();
        assert!(!report.is_mismatch());
        assert!(!report.is_grid_mismatch());
        assert_eq!(report.outputs.len(), 6);
        assert_eq!(svg_count(&out), 6);
        assert_eq!(report.outputs[0], out.join("icon-0.svg"));
    }

    #[test]
    fn exports_four_icons_for_two_by_two() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        let job = job_for(&dir, &icon_grid(2, 2), names(4), Some((2, 2)));

        let report = run_job(&job, &DetectConfig::default(), &out, false).unwrap();
        assert_eq!(report.detected_grid, (2, 2));
        assert_eq!(svg_count(&out), 4);
    }

    #[test]
    fn exported_icon_is_the_tile_crop() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        let job = job_for(&dir, &icon_grid(2, 2), names(4), None);

        let report = run_job(&job, &DetectConfig::default(), &out, false).unwrap();
        // Icon 3 is bottom-right
        let svg = fs::read_to_string(&report.outputs[3]).unwrap();
        assert!(svg.starts_with(&format!(r#"<svg width="{TILE}" height="{TILE}""#)));

        let png = decode_payload(&svg).unwrap();
        let icon = image::load_from_memory(&png).unwrap();
        assert_eq!(icon.dimensions(), (TILE, TILE));
        assert_eq!(icon.to_rgba8().get_pixel(0, 0), &Rgba([10, 10, 200, 255]));
    }

    #[test]
    fn fewer_cells_than_names_truncates() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        let job = job_for(&dir, &icon_grid(2, 2), names(6), None);

        let report = run_job(&job, &DetectConfig::default(), &out, false).unwrap();
        assert!(report.is_mismatch());
        assert_eq!(report.detected, 4);
        assert_eq!(report.expected, 6);
        assert_eq!(svg_count(&out), 4);
    }

    #[test]
    fn fewer_names_than_cells_truncates() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        let job = job_for(&dir, &icon_grid(3, 2), names(4), Some((2, 2)));

        let report = run_job(&job, &DetectConfig::default(), &out, false).unwrap();
        assert!(report.is_mismatch());
        assert!(report.is_grid_mismatch());
        assert_eq!(svg_count(&out), 4);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        let job = job_for(&dir, &icon_grid(2, 2), names(4), None);

        let report = run_job(&job, &DetectConfig::default(), &out, true).unwrap();
        assert_eq!(report.outputs.len(), 4);
        assert!(!out.exists());
    }

    #[test]
    fn job_output_overrides_default() {
        let dir = TempDir::new().unwrap();
        let mut job = job_for(&dir, &icon_grid(2, 2), names(4), None);
        job.output = Some(dir.path().join("custom"));

        run_job(&job, &DetectConfig::default(), &dir.path().join("icons"), false).unwrap();
        assert_eq!(svg_count(&dir.path().join("custom")), 4);
        assert!(!dir.path().join("icons").exists());
    }

    #[test]
    fn blank_screenshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blank = RgbaImage::from_pixel(300, 300, Rgba([255, 255, 255, 255]));
        let job = job_for(&dir, &blank, names(1), None);

        let err = run_job(&job, &DetectConfig::default(), dir.path(), false).unwrap_err();
        assert!(matches!(err, ExtractError::Blank(_)));
    }

    #[test]
    fn content_without_bands_reports_zero_cells() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("icons");
        // a thin bar: rows stay under 10% of the width, so no row band opens
        let mut img = RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255]));
        fill(&mut img, 50, 50, 70, 240, Rgba([0, 0, 0, 255]));
        let job = job_for(&dir, &img, vec!["A".to_string()], None);

        let report = run_job(&job, &DetectConfig::default(), &out, false).unwrap();
        assert_eq!(report.detected, 0);
        assert_eq!(report.expected, 1);
        assert!(report.is_mismatch());
        assert!(report.outputs.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn missing_file_is_load_error() {
        let job = JobConfig {
            path: PathBuf::from("/definitely/not/here.png"),
            grid: None,
            names: names(1),
            output: None,
        };

        let err = run_job(&job, &DetectConfig::default(), Path::new("/tmp"), false).unwrap_err();
        assert!(matches!(err, ExtractError::Load(..)));
        assert!(err.to_string().contains("here.png"));
    }
}
