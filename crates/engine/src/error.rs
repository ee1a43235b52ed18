use std::fmt;

use crate::address::{column_letters, MAX_COLUMN_INDEX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A shared-string cell points past the end of the shared string table.
    SharedString { index: usize, available: usize },
    /// A shared-string cell whose stored value is not an integer index.
    InvalidIndex(String),
    /// A cell reference past the last worksheet column.
    ColumnOutOfRange(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedString { index, available } => {
                write!(f, "shared string {index} out of range ({available} available)")
            }
            Self::InvalidIndex(raw) => write!(f, "invalid shared string index '{raw}'"),
            Self::ColumnOutOfRange(reference) => write!(
                f,
                "cell reference '{reference}' is beyond the last column ({})",
                column_letters(MAX_COLUMN_INDEX)
            ),
        }
    }
}

impl std::error::Error for ExtractError {}
