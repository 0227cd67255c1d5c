//! `inspect` command: print detected layouts as JSON.

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::cli::InspectArgs;
use crate::cli::common::error_chain;
use crate::config::{IconConfig, JobConfig};
use crate::extract::{Layout, detect_layout};
use crate::image::load_rgba;
use crate::log;
use crate::logger::status_error;
use crate::utils::plural_s;

/// Detection result of one job, with labels attached in reading order.
#[derive(Debug, Serialize)]
struct JobLayout<'a> {
    job: String,
    path: String,
    /// Labels paired with `layout.cells` by position (`null` past the list).
    names: Vec<Option<&'a str>>,
    layout: Layout,
}

pub fn run_inspect(config: &IconConfig, args: &InspectArgs) -> Result<()> {
    let jobs: Vec<_> = config.selected_jobs(&args.only).collect();
    if jobs.is_empty() {
        bail!("no job matches --only {}", args.only.join(", "));
    }

    let (layouts, failed) = inspect_jobs(config, &jobs);

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&layouts)?
    } else {
        serde_json::to_string(&layouts)?
    };
    println!("{}", formatted);

    if failed > 0 {
        bail!("{} of {} job{} failed", failed, jobs.len(), plural_s(jobs.len()));
    }
    Ok(())
}

/// Inspect every job, reporting failures on stderr and keeping the rest.
fn inspect_jobs<'a>(config: &IconConfig, jobs: &[&'a JobConfig]) -> (Vec<JobLayout<'a>>, usize) {
    let mut layouts = Vec::with_capacity(jobs.len());
    let mut failed = 0;
    for job in jobs {
        match inspect_job(config, job) {
            Ok(layout) => layouts.push(layout),
            Err(err) => {
                failed += 1;
                status_error(&format!("{} failed", job.label()), &error_chain(&*err));
            }
        }
    }
    (layouts, failed)
}

fn inspect_job<'a>(config: &IconConfig, job: &'a JobConfig) -> Result<JobLayout<'a>> {
    log!("inspect"; "{}", job.path.display());
    let img = load_rgba(&job.path)
        .with_context(|| format!("failed to load `{}`", job.path.display()))?;
    let layout = detect_layout(&img, &config.detect);

    let names = (0..layout.cells.len())
        .map(|i| job.names.get(i).map(String::as_str))
        .collect();

    Ok(JobLayout {
        job: job.label(),
        path: job.path.display().to_string(),
        names,
        layout,
    })
}
