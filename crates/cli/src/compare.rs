//! `sheetrecon compare`: three-way reconciliation with a console listing.

use std::path::{Path, PathBuf};

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use sheetrecon_recon::{three_way, ColumnPolicy, RowStatus, SideLabels, ThreeWayReport};

use crate::inputs::{check_headers, load_all, policy_for};
use crate::CliError;

pub fn cmd_compare(
    source: PathBuf,
    primary: PathBuf,
    reference: PathBuf,
    json: bool,
    strict_columns: bool,
) -> Result<(), CliError> {
    run_three_way(
        [source.as_path(), primary.as_path(), reference.as_path()],
        &SideLabels::default(),
        policy_for(strict_columns),
        json,
    )
}

/// Load the three workbooks (source, primary, reference), reconcile, and print.
pub fn run_three_way(
    paths: [&Path; 3],
    labels: &SideLabels,
    policy: ColumnPolicy,
    json: bool,
) -> Result<(), CliError> {
    let [source, primary, reference] = paths;
    let loaded = load_all(&[
        (labels.source.as_str(), source),
        (labels.primary.as_str(), primary),
        (labels.reference.as_str(), reference),
    ])?;
    check_headers(policy, &loaded)?;

    let report = three_way(&loaded[0].table, &loaded[1].table, &loaded[2].table, labels);

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    for side in &loaded {
        println!("Loaded {}: {} rows", side.label, side.table.row_count());
    }
    print!("{}", render_report(&report, labels, std::io::stdout().is_tty()));
    Ok(())
}

/// Console listing: one line per row not found in the primary, then the
/// summary block.
pub fn render_report(report: &ThreeWayReport, labels: &SideLabels, color: bool) -> String {
    let mut out = String::from("\n--- Comparison Results ---\n\n");

    for entry in &report.entries {
        let tag = match entry.status {
            RowStatus::MatchedReference => format!("[FOUND IN {}]", labels.reference),
            RowStatus::Missing => "[MISSING]".to_string(),
            RowStatus::MatchedPrimary => continue,
        };
        let tag = match (color, entry.status) {
            (false, _) => tag,
            (true, RowStatus::MatchedReference) => tag.yellow().to_string(),
            (true, _) => tag.red().to_string(),
        };
        out.push_str(&format!("{tag} Row Data: {}\n", entry.signature));
    }

    let s = &report.summary;
    out.push_str("\n--- Summary ---\n");
    out.push_str(&format!("Total Rows in {}: {}\n", labels.source, s.total));
    out.push_str(&format!("Matched in {} (Primary): {}\n", labels.primary, s.matched_primary));
    out.push_str(&format!("Matched in {} (Reference): {}\n", labels.reference, s.matched_reference));
    out.push_str(&format!("Missing Completely: {}\n", s.missing));
    out
}
