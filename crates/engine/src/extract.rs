//! Table extraction from a raw worksheet cell grid.
//!
//! The first row names the columns; every later row becomes a data row.
//! Cells are placed by their address, so sparse rows (skipped blank cells)
//! land in the right column. Rows that resolve to nothing but whitespace
//! are dropped.

use crate::address::{column_index, try_column_index, MAX_COLUMN_INDEX};
use crate::error::ExtractError;
use crate::shared_strings::{resolve_value, SharedStrings};
use crate::table::{Row, Table};

/// A cell as stored in the worksheet, before any resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// A1-style reference (`r` attribute), if present
    pub reference: Option<String>,
    /// Stored value text, if any
    pub value: Option<String>,
    /// Value is an index into the shared string table
    pub shared: bool,
}

impl RawCell {
    pub fn new(reference: &str, value: &str) -> Self {
        Self {
            reference: Some(reference.to_string()),
            value: Some(value.to_string()),
            shared: false,
        }
    }

    pub fn shared(reference: &str, index: usize) -> Self {
        Self {
            reference: Some(reference.to_string()),
            value: Some(index.to_string()),
            shared: true,
        }
    }
}

/// One worksheet row: its cells in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }
}

/// Build a rectangular table from raw worksheet rows.
///
/// Zero input rows produce an empty table.
pub fn extract_table<'a, I>(rows: I, strings: Option<&SharedStrings>) -> Result<Table, ExtractError>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut table = Table::new();
    let mut rows = rows.into_iter();

    let Some(header) = rows.next() else {
        return Ok(table);
    };

    for (col, text) in resolve_row(header, strings)? {
        table.ensure_width(col + 1);
        if !text.is_empty() {
            table.set_column_name(col, &text);
        }
    }

    let mut dropped = 0usize;
    for raw in rows {
        let resolved = resolve_row(raw, strings)?;
        if let Some(max_col) = resolved.iter().map(|(col, _)| *col).max() {
            table.ensure_width(max_col + 1);
        }

        let mut cells = vec![String::new(); table.column_count()];
        for (col, text) in resolved {
            cells[col] = text;
        }

        let row = Row::new(cells);
        if row.is_blank() {
            dropped += 1;
            continue;
        }
        table.push_row(row);
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} blank row(s)");
    }

    Ok(table)
}

/// Resolve every cell of a row to (column index, text).
fn resolve_row(
    row: &RawRow,
    strings: Option<&SharedStrings>,
) -> Result<Vec<(usize, String)>, ExtractError> {
    row.cells
        .iter()
        .map(|cell| {
            let reference = cell.reference.as_deref().unwrap_or("");
            if try_column_index(reference).is_none() {
                log::warn!("malformed cell reference '{reference}'; placing value in first column");
            }
            let col = column_index(reference);
            if col > MAX_COLUMN_INDEX {
                return Err(ExtractError::ColumnOutOfRange(reference.to_string()));
            }
            let text = resolve_value(cell.value.as_deref(), cell.shared, strings)?;
            Ok((col, text))
        })
        .collect()
}
