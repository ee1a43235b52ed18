//! Row signatures: the equality key used for reconciliation.
//!
//! A signature is every cell's trimmed text joined by [`SIGNATURE_SEPARATOR`]
//! in column order. Comparison is whole-row, positional and case-sensitive.

use rustc_hash::FxHashSet;

use crate::table::{Row, Table};

/// Separator between cell values in a signature.
pub const SIGNATURE_SEPARATOR: char = '|';

/// Set of row signatures for O(1) membership tests.
pub type RowHashSet = FxHashSet<String>;

/// Canonical signature of a row.
pub fn row_signature(row: &Row) -> String {
    let mut sig = String::new();
    for (i, cell) in row.cells().iter().enumerate() {
        if i > 0 {
            sig.push(SIGNATURE_SEPARATOR);
        }
        sig.push_str(cell.trim());
    }
    sig
}

/// Signatures of every row in a table.
pub fn signature_set(table: &Table) -> RowHashSet {
    table.rows().iter().map(row_signature).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row::new(cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_signature_trims_and_joins() {
        assert_eq!(row_signature(&row(&[" 1 ", "Alice\t"])), "1|Alice");
        assert_eq!(row_signature(&row(&["1", "", "x"])), "1||x");
        assert_eq!(row_signature(&row(&["solo"])), "solo");
        assert_eq!(row_signature(&Row::default()), "");
    }

    #[test]
    fn test_identical_rows_share_signature() {
        let a = Table::from_rows(&["ID", "Name"], &[vec!["1", "Alice"]]);
        let b = Table::from_rows(&["Key", "Who"], &[vec!["1", " Alice "]]);
        assert_eq!(row_signature(&a.rows()[0]), row_signature(&b.rows()[0]));
    }

    #[test]
    fn test_any_cell_difference_changes_signature() {
        let base = row_signature(&row(&["1", "Alice", "NY"]));
        assert_ne!(base, row_signature(&row(&["2", "Alice", "NY"])));
        assert_ne!(base, row_signature(&row(&["1", "alice", "NY"])));
        assert_ne!(base, row_signature(&row(&["1", "Alice", "LA"])));
    }

    #[test]
    fn test_column_order_matters() {
        assert_ne!(row_signature(&row(&["a", "b"])), row_signature(&row(&["b", "a"])));
    }

    #[test]
    fn test_signature_set_dedupes() {
        let t = Table::from_rows(&["ID"], &[vec!["1"], vec!["1"], vec!["2"]]);
        let set = signature_set(&t);
        assert_eq!(set.len(), 2);
        assert!(set.contains("1"));
        assert!(set.contains("2"));
    }
}
