use serde::{Deserialize, Serialize};
use sheetrecon_engine::Table;

use crate::error::ReconError;

/// How to treat inputs whose headers disagree.
///
/// Matching is positional either way; the policy only decides whether a
/// header disagreement is a warning or an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    #[default]
    Positional,
    Strict,
}

/// Compare every table's header against the first one's.
///
/// `tables` pairs each table with its side label. Empty tables with no
/// columns are skipped: they match nothing and constrain nothing.
pub fn check_columns(policy: ColumnPolicy, tables: &[(&str, &Table)]) -> Result<(), ReconError> {
    let mut iter = tables.iter().filter(|(_, t)| t.column_count() > 0);
    let Some((expected_side, expected)) = iter.next() else {
        return Ok(());
    };

    for (side, table) in iter {
        if table.columns() == expected.columns() {
            continue;
        }
        match policy {
            ColumnPolicy::Positional => log::warn!(
                "columns of {side} [{}] differ from {expected_side} [{}]; rows are compared by position",
                table.columns().join(", "),
                expected.columns().join(", ")
            ),
            ColumnPolicy::Strict => {
                return Err(ReconError::ColumnMismatch {
                    expected_side: expected_side.to_string(),
                    side: side.to_string(),
                    expected: expected.columns().to_vec(),
                    found: table.columns().to_vec(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Table {
        Table::from_rows(names, &[])
    }

    #[test]
    fn test_matching_headers_pass_strict() {
        let a = header(&["ID", "Name"]);
        let b = header(&["ID", "Name"]);
        assert!(check_columns(ColumnPolicy::Strict, &[("ST", &a), ("PT", &b)]).is_ok());
    }

    #[test]
    fn test_positional_only_warns() {
        let a = header(&["ID", "Name"]);
        let b = header(&["Name", "ID"]);
        assert!(check_columns(ColumnPolicy::Positional, &[("ST", &a), ("PT", &b)]).is_ok());
    }

    #[test]
    fn test_strict_reports_mismatch() {
        let a = header(&["ID", "Name"]);
        let b = header(&["ID", "Name"]);
        let c = header(&["ID"]);
        let err = check_columns(ColumnPolicy::Strict, &[("ST", &a), ("PT", &b), ("RT", &c)]).unwrap_err();
        match err {
            ReconError::ColumnMismatch { expected_side, side, found, .. } => {
                assert_eq!(expected_side, "ST");
                assert_eq!(side, "RT");
                assert_eq!(found, vec!["ID".to_string()]);
            }
            other => panic!("expected ColumnMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_tables_are_skipped() {
        let empty = Table::new();
        let a = header(&["ID"]);
        assert!(check_columns(ColumnPolicy::Strict, &[("ST", &empty), ("PT", &a)]).is_ok());
        assert!(check_columns(ColumnPolicy::Strict, &[]).is_ok());
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrap {
            policy: ColumnPolicy,
        }
        let w: Wrap = toml::from_str(r#"policy = "strict""#).unwrap();
        assert_eq!(w.policy, ColumnPolicy::Strict);
    }
}
