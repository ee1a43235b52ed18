//! `sheetrecon missing`: two-way difference written to a result workbook.

use std::path::{Path, PathBuf};

use serde_json::json;
use sheetrecon_io::{missing_rows_path, write_table};
use sheetrecon_recon::{two_way, ColumnPolicy, SideLabels};

use crate::inputs::{check_headers, load_all, policy_for};
use crate::CliError;

pub fn cmd_missing(
    source: PathBuf,
    primary: PathBuf,
    output: Option<PathBuf>,
    sheet: String,
    json: bool,
    strict_columns: bool,
) -> Result<(), CliError> {
    let output = output.unwrap_or_else(|| missing_rows_path(&source));
    run_two_way(
        TwoWayRun {
            source: &source,
            primary: &primary,
            output: &output,
            sheet: &sheet,
            labels: &SideLabels::default(),
            policy: policy_for(strict_columns),
        },
        json,
    )
}

/// Everything a two-way run needs besides the output mode.
pub struct TwoWayRun<'a> {
    pub source: &'a Path,
    pub primary: &'a Path,
    pub output: &'a Path,
    pub sheet: &'a str,
    pub labels: &'a SideLabels,
    pub policy: ColumnPolicy,
}

pub fn run_two_way(run: TwoWayRun<'_>, json: bool) -> Result<(), CliError> {
    if run.sheet.trim().is_empty() {
        return Err(CliError::args("sheet name must not be blank"));
    }

    let labels = run.labels;
    let loaded = load_all(&[
        (labels.source.as_str(), run.source),
        (labels.primary.as_str(), run.primary),
    ])?;
    check_headers(run.policy, &loaded)?;

    let report = two_way(&loaded[0].table, &loaded[1].table, labels);
    let written = write_table(&report.table, run.output, run.sheet).map_err(CliError::write)?;

    if json {
        let out = json!({
            "meta": report.meta,
            "summary": report.summary,
            "output": run.output.display().to_string(),
            "rows_written": written.rows_written,
        });
        let out = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    for side in &loaded {
        println!("Loaded {}: {} rows", side.label, side.table.row_count());
    }
    let s = &report.summary;
    println!();
    println!("Rows missing in {}: {}", labels.primary, s.missing_in_primary);
    println!("Rows missing in {}: {}", labels.source, s.missing_in_source);
    println!("Missing rows written to {}", run.output.display());
    Ok(())
}
