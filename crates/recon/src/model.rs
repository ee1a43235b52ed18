use serde::{Deserialize, Serialize};
use sheetrecon_engine::Table;

/// Name of the tag column appended to two-way result tables.
pub const MISSING_IN_COLUMN: &str = "missingIn";

// ---------------------------------------------------------------------------
// Sides
// ---------------------------------------------------------------------------

/// Display names for each side, used in console output and as `missingIn` tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideLabels {
    pub source: String,
    pub primary: String,
    pub reference: String,
}

impl Default for SideLabels {
    fn default() -> Self {
        Self {
            source: "ST".into(),
            primary: "PT".into(),
            reference: "RT".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Three-way
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    MatchedPrimary,
    MatchedReference,
    Missing,
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MatchedPrimary => write!(f, "matched_primary"),
            Self::MatchedReference => write!(f, "matched_reference"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// A source row that was not found in the primary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconEntry {
    pub status: RowStatus,
    /// 1-based position among the source table's data rows
    pub row_number: usize,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreeWaySummary {
    /// Data rows in the source table
    pub total: usize,
    pub primary_rows: usize,
    pub reference_rows: usize,
    pub matched_primary: usize,
    pub matched_reference: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreeWayReport {
    pub meta: ReconMeta,
    pub summary: ThreeWaySummary,
    /// Reference-matched and missing rows, in source order
    pub entries: Vec<ReconEntry>,
}

// ---------------------------------------------------------------------------
// Two-way
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TwoWaySummary {
    pub source_rows: usize,
    pub primary_rows: usize,
    /// Source rows whose signature is absent from the primary
    pub missing_in_primary: usize,
    /// Primary rows whose signature is absent from the source
    pub missing_in_source: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwoWayReport {
    pub meta: ReconMeta,
    pub summary: TwoWaySummary,
    /// Data columns plus the trailing `missingIn` tag column
    pub table: Table,
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub way: u8,
    pub labels: SideLabels,
    pub engine_version: String,
    pub run_at: String,
}

impl ReconMeta {
    pub(crate) fn new(way: u8, labels: &SideLabels) -> Self {
        Self {
            way,
            labels: labels.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
