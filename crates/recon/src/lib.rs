//! `sheetrecon-recon`: row-level reconciliation of spreadsheet tables.
//!
//! Pure engine crate: receives loaded tables, returns reports.
//! No CLI or file-format dependencies.

pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use columns::{check_columns, ColumnPolicy};
pub use config::ReconConfig;
pub use engine::{classify_row, three_way, two_way};
pub use error::ReconError;
pub use model::{
    ReconEntry, ReconMeta, RowStatus, SideLabels, ThreeWayReport, ThreeWaySummary,
    TwoWayReport, TwoWaySummary, MISSING_IN_COLUMN,
};
