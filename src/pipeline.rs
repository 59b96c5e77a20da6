// src/pipeline.rs
use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

use crate::output;
use crate::process::reproject::Reprojector;
use crate::process::{self, filter, merge, split};
use crate::schema::OUTPUT_COLUMNS;

/// Row counts reported by a completed run.
#[derive(Debug)]
pub struct PipelineSummary {
    pub establishments: usize,
    pub pharmacies: usize,
}

/// Run the whole transform over the decoded extract text and write the
/// JSON artifact at `out_path`. Serialization is the last stage, so a
/// failure anywhere leaves the previous artifact untouched.
#[instrument(level = "info", skip(text, out_path))]
pub fn run_pipeline(text: &str, out_path: &Path) -> Result<PipelineSummary> {
    let start = Instant::now();

    let table = process::parse_extract(text)?;
    let (info_half, geoloc_half) = split::split_halves(table)?;
    let establishments = info_half.rows.len();

    let merged = merge::merge_geolocation(info_half, geoloc_half)?;
    let pharmacies = filter::filter_pharmacies(&merged)?;
    let mut projected = filter::project_columns(&pharmacies, &OUTPUT_COLUMNS)?;

    Reprojector::new()?.reproject_table(&mut projected)?;
    output::write_column_major(&projected, out_path)?;

    info!(elapsed = ?start.elapsed(), "pipeline complete");
    Ok(PipelineSummary {
        establishments,
        pharmacies: projected.rows.len(),
    })
}
