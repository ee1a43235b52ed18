use std::path::PathBuf;

use sheetrecon_engine::Table;
use sheetrecon_recon::config::ReconConfig;
use sheetrecon_recon::{check_columns, three_way, two_way, ReconError, RowStatus};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_config(name: &str) -> ReconConfig {
    ReconConfig::from_file(&fixtures_dir().join(name)).unwrap()
}

fn table(header: &[&str], rows: &[&[&str]]) -> Table {
    let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.to_vec()).collect();
    Table::from_rows(header, &rows)
}

// -------------------------------------------------------------------------
// 3-Way Tests
// -------------------------------------------------------------------------

#[test]
fn three_way_from_config() {
    let config = load_config("three-way.recon.toml");
    assert_eq!(config.way, 3);

    let inputs = config.resolve_inputs(&fixtures_dir());
    assert_eq!(inputs.reference, Some(fixtures_dir().join("RT.xlsx")));

    let st = table(
        &["ID", "Name", "City"],
        &[
            &["1", "Alice", "Oslo"],
            &["2", "Bob", "Rome"],
            &["3", "Carol", "Lima"],
            &["4", "Dan", "Kyiv"],
        ],
    );
    let pt = table(&["ID", "Name", "City"], &[&["1", "Alice", "Oslo"], &["4", "Dan", "Kyiv"]]);
    let rt = table(&["ID", "Name", "City"], &[&["2", "Bob", "Rome"], &["4", "Dan", "Kyiv"]]);

    check_columns(config.columns.policy, &[("ST", &st), ("PT", &pt), ("RT", &rt)]).unwrap();
    let report = three_way(&st, &pt, &rt, &config.labels);

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.matched_primary, 2);
    assert_eq!(report.summary.matched_reference, 1);
    assert_eq!(report.summary.missing, 1);

    let statuses: Vec<(RowStatus, usize, &str)> = report
        .entries
        .iter()
        .map(|e| (e.status, e.row_number, e.signature.as_str()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (RowStatus::MatchedReference, 2, "2|Bob|Rome"),
            (RowStatus::Missing, 3, "3|Carol|Lima"),
        ]
    );
}

#[test]
fn three_way_report_serializes() {
    let st = table(&["ID"], &[&["1"], &["2"]]);
    let pt = table(&["ID"], &[&["1"]]);
    let report = three_way(&st, &pt, &Table::new(), &Default::default());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["meta"]["way"], 3);
    assert_eq!(json["meta"]["labels"]["primary"], "PT");
    assert_eq!(json["summary"]["missing"], 1);
    assert_eq!(json["entries"][0]["status"], "missing");
    assert_eq!(json["entries"][0]["signature"], "2");
    assert!(json["meta"]["run_at"].is_string());
}

// -------------------------------------------------------------------------
// 2-Way Tests
// -------------------------------------------------------------------------

#[test]
fn two_way_from_config_uses_labels() {
    let config = load_config("two-way.recon.toml");
    assert_eq!(config.way, 2);
    assert_eq!(config.output.sheet, "Missing");

    let inputs = config.resolve_inputs(&fixtures_dir());
    assert_eq!(
        config.output_path(&inputs.source),
        fixtures_dir().join("diff.xlsx")
    );

    let ledger = table(&["Ref", "Amount"], &[&["A1", "10"], &["A2", "20"]]);
    let bank = table(&["Ref", "Amount"], &[&["A2", "20"], &["A3", "30"], &["A3", "30"]]);

    check_columns(config.columns.policy, &[("LEDGER", &ledger), ("BANK", &bank)]).unwrap();
    let report = two_way(&ledger, &bank, &config.labels);

    assert_eq!(report.table.columns(), &["Ref", "Amount", "missingIn"]);
    let rows: Vec<&[String]> = report.table.rows().iter().map(|r| r.cells()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], &["A1", "10", "BANK"]);
    assert_eq!(rows[1], &["A3", "30", "LEDGER"]);
    assert_eq!(rows[2], &["A3", "30", "LEDGER"]);
    assert_eq!(report.summary.missing_in_primary, 1);
    assert_eq!(report.summary.missing_in_source, 2);
}

#[test]
fn strict_policy_rejects_reordered_headers() {
    let config = load_config("two-way.recon.toml");
    let ledger = table(&["Ref", "Amount"], &[]);
    let bank = table(&["Amount", "Ref"], &[]);

    let err = check_columns(config.columns.policy, &[("LEDGER", &ledger), ("BANK", &bank)]).unwrap_err();
    assert!(matches!(err, ReconError::ColumnMismatch { .. }));
    assert!(err.to_string().contains("BANK"));
}
