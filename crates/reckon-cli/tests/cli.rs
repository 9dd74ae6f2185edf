//! End-to-end tests for the reckon binary over pre-rendered circulars.

use assert_cmd::Command;
use predicates::prelude::*;

const CIRCULAR: &str = "\
PRICE CIRCULAR
Basic prices revised w.e.f. 11.7.2025

PRODUCTS Basic Price (Rs/MT)
1. EC Grade Ingot 249500
2. Cast Billet 252000

NOTE: All prices are ex-works.
";

fn reckon() -> Command {
    Command::cargo_bin("reckon").unwrap()
}

#[test]
fn test_process_writes_per_product_csvs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("circular-11-july-2025.txt");
    std::fs::write(&input, CIRCULAR).unwrap();
    let csv_dir = dir.path().join("csv");

    reckon()
        .arg("process")
        .arg(&input)
        .arg("--csv-dir")
        .arg(&csv_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records extracted"));

    let ingot = std::fs::read_to_string(csv_dir.join("EC_Grade_Ingot.csv")).unwrap();
    assert!(ingot.starts_with("Date,Product,Price"));
    assert!(ingot.contains("2025-07-11,EC Grade Ingot,249500"));

    let billet = std::fs::read_to_string(csv_dir.join("Cast_Billet.csv")).unwrap();
    assert!(billet.contains("2025-07-11,Cast Billet,252000"));
}

#[test]
fn test_reprocessing_skips_existing_dates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("circular-11-july-2025.txt");
    std::fs::write(&input, CIRCULAR).unwrap();
    let csv_dir = dir.path().join("csv");

    for _ in 0..2 {
        reckon()
            .arg("process")
            .arg(&input)
            .arg("--csv-dir")
            .arg(&csv_dir)
            .assert()
            .success();
    }

    let ingot = std::fs::read_to_string(csv_dir.join("EC_Grade_Ingot.csv")).unwrap();
    // header plus exactly one data row, despite two runs
    assert_eq!(ingot.lines().count(), 2);
}

#[test]
fn test_document_without_table_warns_but_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("circular-notes.txt");
    std::fs::write(
        &input,
        "This circular contains announcements only, without any product price table.",
    )
    .unwrap();

    reckon()
        .arg("process")
        .arg(&input)
        .arg("--csv-dir")
        .arg(dir.path().join("csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 records extracted"))
        .stderr(predicate::str::contains("no price rows recognized"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    reckon()
        .arg("process")
        .arg(dir.path().join("does-not-exist.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("circular.docx");
    std::fs::write(&input, "irrelevant").unwrap();

    reckon()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
