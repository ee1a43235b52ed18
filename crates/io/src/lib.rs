// Spreadsheet file I/O: XLSX input tables and XLSX result output

pub mod cell_kind;
pub mod error;
pub mod writer;
pub mod xlsx;

pub use error::{ReadError, WriteError};
pub use writer::{missing_rows_path, write_table, WriteSummary, DEFAULT_SHEET_NAME, MISSING_ROWS_FILE};
pub use xlsx::{read_table, read_table_from_bytes, read_table_from_reader};
