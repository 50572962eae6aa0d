// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetit::commands::{exporter, importer};
use budgetit::models::{sample_categories, Transaction, TransactionKind};
use budgetit::cli;
use budgetit::store::{Categories, Store, Transactions};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn tx(id: i64) -> Transaction {
    Transaction {
        id,
        kind: TransactionKind::Expense,
        amount: Decimal::new(4250, 2),
        date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        category_id: 1,
        account_id: 1,
        description: Some("Groceries".to_string()),
        tags: None,
        is_recurring: None,
    }
}

fn seeded_store(dir: &std::path::Path) -> Store {
    let store = Store::open(dir).unwrap();
    store.set::<Categories>(&sample_categories()).unwrap();
    store.set::<Transactions>(&vec![tx(1), tx(2)]).unwrap();
    store
}

fn run(store: &Store, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("export", sub)) => exporter::handle(store, sub),
        Some(("import", sub)) => importer::handle(store, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn backup_writes_versioned_envelope() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let out = dir.path().join("backup.json");

    run(
        &store,
        &["budgetit", "export", "backup", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(envelope["version"], exporter::BACKUP_VERSION);
    assert!(envelope["timestamp"].is_string());

    let data = envelope["data"].as_object().unwrap();
    assert_eq!(data["categories"].as_array().unwrap().len(), 12);
    assert_eq!(data["transactions"].as_array().unwrap().len(), 2);
    // Buckets that were never written stay out of the envelope
    assert!(!data.contains_key("budgets"));
}

#[test]
fn backup_round_trips_through_import() {
    let src_dir = tempdir().unwrap();
    let store = seeded_store(src_dir.path());
    let out = src_dir.path().join("backup.json");
    run(
        &store,
        &["budgetit", "export", "backup", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let dst_dir = tempdir().unwrap();
    let fresh = Store::open(dst_dir.path()).unwrap();
    run(
        &fresh,
        &["budgetit", "import", "--file", out.to_str().unwrap()],
    )
    .unwrap();

    assert_eq!(fresh.get::<Categories>().len(), 12);
    let txs = fresh.get::<Transactions>();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount, Decimal::new(4250, 2));
}

#[test]
fn import_without_overwrite_keeps_existing_buckets() {
    let src_dir = tempdir().unwrap();
    let store = seeded_store(src_dir.path());
    let out = src_dir.path().join("backup.json");
    run(
        &store,
        &["budgetit", "export", "backup", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let dst_dir = tempdir().unwrap();
    let target = Store::open(dst_dir.path()).unwrap();
    target.set::<Transactions>(&vec![tx(99)]).unwrap();

    run(
        &target,
        &["budgetit", "import", "--file", out.to_str().unwrap()],
    )
    .unwrap();
    // Existing transactions survive, the absent categories bucket fills
    assert_eq!(target.get::<Transactions>()[0].id, 99);
    assert_eq!(target.get::<Categories>().len(), 12);

    run(
        &target,
        &[
            "budgetit",
            "import",
            "--file",
            out.to_str().unwrap(),
            "--overwrite",
        ],
    )
    .unwrap();
    assert_eq!(target.get::<Transactions>()[0].id, 1);
}

#[test]
fn import_rejects_malformed_backups() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let no_version = dir.path().join("no_version.json");
    std::fs::write(&no_version, r#"{"data": {}}"#).unwrap();
    assert!(run(
        &store,
        &["budgetit", "import", "--file", no_version.to_str().unwrap()],
    )
    .is_err());

    let no_data = dir.path().join("no_data.json");
    std::fs::write(&no_data, r#"{"version": "1.0.0"}"#).unwrap();
    assert!(run(
        &store,
        &["budgetit", "import", "--file", no_data.to_str().unwrap()],
    )
    .is_err());

    let not_json = dir.path().join("garbage.json");
    std::fs::write(&not_json, "not json").unwrap();
    assert!(run(
        &store,
        &["budgetit", "import", "--file", not_json.to_str().unwrap()],
    )
    .is_err());
}

#[test]
fn csv_export_derives_headers_from_records() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let out = dir.path().join("transactions.csv");

    run(
        &store,
        &[
            "budgetit",
            "export",
            "csv",
            "--bucket",
            "transactions",
            "--out",
            out.to_str().unwrap(),
        ],
    )
    .unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let mut lines = raw.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("amount"));
    assert!(header.contains("type"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn csv_export_of_absent_bucket_writes_empty_file() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let out = dir.path().join("budgets.csv");

    run(
        &store,
        &[
            "budgetit",
            "export",
            "csv",
            "--bucket",
            "budgets",
            "--out",
            out.to_str().unwrap(),
        ],
    )
    .unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
}
