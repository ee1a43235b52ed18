//! Loading input workbooks for a comparison run.
//!
//! Every input is read, one after another, before any comparison starts. The
//! first failure aborts the run.

use std::path::Path;
use std::time::Instant;

use sheetrecon_engine::Table;
use sheetrecon_recon::{check_columns, ColumnPolicy};

use crate::CliError;

/// One loaded side of a comparison.
pub struct LoadedTable {
    pub label: String,
    pub table: Table,
}

/// Read each `(label, path)` in order.
pub fn load_all(sides: &[(&str, &Path)]) -> Result<Vec<LoadedTable>, CliError> {
    let mut loaded = Vec::with_capacity(sides.len());
    for (label, path) in sides {
        let start = Instant::now();
        let table = sheetrecon_io::read_table(path).map_err(|e| CliError::read(label, e))?;
        log::debug!(
            "loaded {label} from {}: {} rows x {} columns in {}ms",
            path.display(),
            table.row_count(),
            table.column_count(),
            start.elapsed().as_millis()
        );
        loaded.push(LoadedTable { label: label.to_string(), table });
    }
    Ok(loaded)
}

/// Apply the column policy across all loaded sides.
pub fn check_headers(policy: ColumnPolicy, loaded: &[LoadedTable]) -> Result<(), CliError> {
    let sides: Vec<(&str, &Table)> = loaded.iter().map(|l| (l.label.as_str(), &l.table)).collect();
    check_columns(policy, &sides).map_err(CliError::recon)
}

pub fn policy_for(strict_columns: bool) -> ColumnPolicy {
    if strict_columns {
        ColumnPolicy::Strict
    } else {
        ColumnPolicy::Positional
    }
}
