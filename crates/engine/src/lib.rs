//! `sheetrecon-engine`: tabular model and extraction.
//!
//! Turns a worksheet's raw cell grid into a rectangular, header-named table
//! and computes row signatures. No file IO.

pub mod address;
pub mod error;
pub mod extract;
pub mod shared_strings;
pub mod signature;
pub mod table;

pub use error::ExtractError;
pub use extract::{extract_table, RawCell, RawRow};
pub use shared_strings::SharedStrings;
pub use signature::{row_signature, signature_set, RowHashSet};
pub use table::{Row, Table};
