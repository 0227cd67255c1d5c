//! `extract` command: run every selected job and report each outcome.

use anyhow::{Result, bail};

use crate::cli::ExtractArgs;
use crate::cli::common::error_chain;
use crate::config::IconConfig;
use crate::extract::{JobReport, run_job};
use crate::log;
use crate::logger::{status_error, status_success, status_warning};
use crate::utils::plural_s;

/// Run the selected jobs one after another.
///
/// A failing job is reported and skipped; the command fails at the end if
/// any job failed. Files already written are left in place.
pub fn run_extract(config: &IconConfig, args: &ExtractArgs) -> Result<()> {
    let jobs: Vec<_> = config.selected_jobs(&args.only).collect();
    if jobs.is_empty() {
        bail!("no job matches --only {}", args.only.join(", "));
    }

    let mut failed = 0;
    let mut written = 0;
    for job in &jobs {
        log!("extract"; "processing {}", job.path.display());
        match run_job(job, &config.detect, &config.output, args.dry_run) {
            Ok(report) => {
                written += report.outputs.len();
                report_job(&job.label(), &report, args.dry_run);
            }
            Err(err) => {
                failed += 1;
                status_error(&format!("{} failed", job.label()), &error_chain(&err));
            }
        }
    }

    let verb = if args.dry_run { "would write" } else { "wrote" };
    log!("extract"; "{} {} icon{} from {} job{}",
        verb, written, plural_s(written), jobs.len(), plural_s(jobs.len()));

    if failed > 0 {
        bail!("{} of {} job{} failed", failed, jobs.len(), plural_s(jobs.len()));
    }
    Ok(())
}

fn report_job(label: &str, report: &JobReport, dry_run: bool) {
    if let Some(grid) = report.grid
        && report.is_grid_mismatch()
    {
        let (cols, rows) = report.detected_grid;
        status_warning(&format!(
            "{label}: configured grid {}x{} but detected {cols}x{rows}",
            grid.cols, grid.rows
        ));
    }

    let summary = format!(
        "{label}: {} of {} icon{} {}",
        report.outputs.len(),
        report.expected,
        plural_s(report.expected),
        if dry_run { "planned" } else { "exported" },
    );
    if report.is_mismatch() {
        status_warning(&format!("{summary} ({} cells detected)", report.detected));
    } else {
        status_success(&summary);
    }
}
