use sheetrecon_engine::{row_signature, signature_set, Row, RowHashSet, Table};

use crate::model::{
    ReconEntry, ReconMeta, RowStatus, SideLabels, ThreeWayReport, ThreeWaySummary, TwoWayReport,
    TwoWaySummary, MISSING_IN_COLUMN,
};

/// Account for every source row against the primary, then the reference.
///
/// The primary is always consulted first: a row present in both is
/// `MatchedPrimary`. Only reference-matched and missing rows produce entries.
pub fn three_way(source: &Table, primary: &Table, reference: &Table, labels: &SideLabels) -> ThreeWayReport {
    let primary_set = signature_set(primary);
    let reference_set = signature_set(reference);

    let mut summary = ThreeWaySummary {
        total: source.row_count(),
        primary_rows: primary.row_count(),
        reference_rows: reference.row_count(),
        ..Default::default()
    };
    let mut entries = Vec::new();

    for (idx, row) in source.rows().iter().enumerate() {
        let signature = row_signature(row);
        let status = classify_row(&signature, &primary_set, &reference_set);
        match status {
            RowStatus::MatchedPrimary => {
                summary.matched_primary += 1;
                continue;
            }
            RowStatus::MatchedReference => summary.matched_reference += 1,
            RowStatus::Missing => summary.missing += 1,
        }
        entries.push(ReconEntry { status, row_number: idx + 1, signature });
    }

    log::debug!(
        "three-way: {} rows, {} in {}, {} in {}, {} missing",
        summary.total,
        summary.matched_primary,
        labels.primary,
        summary.matched_reference,
        labels.reference,
        summary.missing
    );

    ThreeWayReport {
        meta: ReconMeta::new(3, labels),
        summary,
        entries,
    }
}

/// Status of one signature: primary wins over reference.
pub fn classify_row(signature: &str, primary: &RowHashSet, reference: &RowHashSet) -> RowStatus {
    if primary.contains(signature) {
        RowStatus::MatchedPrimary
    } else if reference.contains(signature) {
        RowStatus::MatchedReference
    } else {
        RowStatus::Missing
    }
}

/// Symmetric difference of source and primary as one tagged table.
///
/// Source rows absent from the primary come first, tagged with the primary's
/// label; then primary rows absent from the source, tagged with the source's
/// label. Duplicate rows are emitted once per occurrence.
pub fn two_way(source: &Table, primary: &Table, labels: &SideLabels) -> TwoWayReport {
    let source_set = signature_set(source);
    let primary_set = signature_set(primary);

    let width = source.column_count().max(primary.column_count());
    // Columns only the primary has keep the primary's header names
    let mut header = Vec::with_capacity(width);
    header.extend_from_slice(source.columns());
    header.extend(primary.columns().iter().skip(source.column_count()).cloned());
    let mut table = Table::from_rows(header.as_slice(), &[]).with_tag_column(MISSING_IN_COLUMN);

    let mut summary = TwoWaySummary {
        source_rows: source.row_count(),
        primary_rows: primary.row_count(),
        ..Default::default()
    };

    for row in source.rows() {
        if !primary_set.contains(&row_signature(row)) {
            table.push_row(tagged(row, width, &labels.primary));
            summary.missing_in_primary += 1;
        }
    }
    for row in primary.rows() {
        if !source_set.contains(&row_signature(row)) {
            table.push_row(tagged(row, width, &labels.source));
            summary.missing_in_source += 1;
        }
    }

    log::debug!(
        "two-way: {} missing in {}, {} missing in {}",
        summary.missing_in_primary,
        labels.primary,
        summary.missing_in_source,
        labels.source
    );

    TwoWayReport {
        meta: ReconMeta::new(2, labels),
        summary,
        table,
    }
}

fn tagged(row: &Row, width: usize, tag: &str) -> Vec<String> {
    let mut cells = Vec::with_capacity(width + 1);
    cells.extend(row.cells().iter().cloned());
    cells.resize(width, String::new());
    cells.push(tag.to_string());
    cells
}
