// XLSX table export.
//
// Writes one table as a single-sheet workbook: a bold header row of column
// names, then every data row with per-cell type inference (see cell_kind).

use std::path::{Path, PathBuf};
use std::time::Instant;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sheetrecon_engine::Table;

use crate::cell_kind::{infer_cell, OutputCell, DATE_FORMAT};
use crate::error::WriteError;

/// File name of the two-way result workbook.
pub const MISSING_ROWS_FILE: &str = "missingRows.xlsx";

/// Default worksheet name for written tables.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Counts of what was written, by inferred cell kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows_written: usize,
    pub dates: usize,
    pub numbers: usize,
    pub text: usize,
    pub write_duration_ms: u128,
}

/// Output path for the two-way result: the source file's directory plus
/// [`MISSING_ROWS_FILE`].
pub fn missing_rows_path(source: &Path) -> PathBuf {
    match source.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(MISSING_ROWS_FILE),
        _ => PathBuf::from(MISSING_ROWS_FILE),
    }
}

/// Write `table` to `path` as a new workbook, replacing any existing file.
pub fn write_table(table: &Table, path: &Path, sheet_name: &str) -> Result<WriteSummary, WriteError> {
    let start = Instant::now();
    let err = |e: XlsxError| WriteError { path: path.to_path_buf(), reason: e.to_string() };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(err)?;

    let header_format = Format::new().set_bold();
    for (col, name) in table.columns().iter().enumerate() {
        let col = column_number(col, path)?;
        worksheet
            .write_string_with_format(0, col, name, &header_format)
            .map_err(err)?;
    }

    let mut summary = WriteSummary::default();
    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(idx + 1).map_err(|_| WriteError {
            path: path.to_path_buf(),
            reason: format!("row {} exceeds the worksheet limit", idx + 1),
        })?;

        for (col, value) in row.cells().iter().enumerate() {
            let col = column_number(col, path)?;
            match infer_cell(value) {
                OutputCell::Date(dt) => {
                    worksheet
                        .write_string(row_num, col, dt.format(DATE_FORMAT).to_string())
                        .map_err(err)?;
                    summary.dates += 1;
                }
                OutputCell::Number(n) => {
                    worksheet.write_number(row_num, col, n).map_err(err)?;
                    summary.numbers += 1;
                }
                OutputCell::Text(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    worksheet.write_string(row_num, col, text).map_err(err)?;
                    summary.text += 1;
                }
            }
        }
        summary.rows_written += 1;
    }

    worksheet.autofit();

    workbook.save(path).map_err(err)?;

    summary.write_duration_ms = start.elapsed().as_millis();
    log::debug!(
        "wrote {} rows to {} ({} dates, {} numbers, {} text)",
        summary.rows_written,
        path.display(),
        summary.dates,
        summary.numbers,
        summary.text
    );
    Ok(summary)
}

fn column_number(col: usize, path: &Path) -> Result<u16, WriteError> {
    u16::try_from(col).map_err(|_| WriteError {
        path: path.to_path_buf(),
        reason: format!("column {} exceeds the worksheet limit", col + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rows_path() {
        assert_eq!(
            missing_rows_path(Path::new("/data/reports/ST.xlsx")),
            PathBuf::from("/data/reports/missingRows.xlsx")
        );
        assert_eq!(missing_rows_path(Path::new("ST.xlsx")), PathBuf::from("missingRows.xlsx"));
    }

    #[test]
    fn test_write_counts_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let table = Table::from_rows(
            &["ID", "When", "Name", "Note"],
            &[vec!["1", "45000", "Alice", ""], vec!["2", "2024-01-15", "Bob", "x"]],
        );

        let summary = write_table(&table, &path, DEFAULT_SHEET_NAME).unwrap();
        assert!(path.exists());
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.dates, 2);
        assert_eq!(summary.numbers, 2);
        assert_eq!(summary.text, 3);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        let table = Table::from_rows(&["ID"], &[vec!["1"]]);
        write_table(&table, &path, DEFAULT_SHEET_NAME).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_rejects_bad_sheet_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let table = Table::from_rows(&["ID"], &[vec!["1"]]);
        let err = write_table(&table, &path, "bad/name").unwrap_err();
        assert_eq!(err.path, path);
    }
}
