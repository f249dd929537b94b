//! Integration tests for the concilia CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn process_requires_document_arguments() {
    Command::cargo_bin("concilia")
        .unwrap()
        .arg("process")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--xml"));
}

#[test]
fn process_reports_missing_files() {
    Command::cargo_bin("concilia")
        .unwrap()
        .args([
            "process",
            "--xml",
            "no-such-factura.xml",
            "--pdf",
            "no-such-factura.pdf",
            "--oc",
            "no-such-oc.pdf",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_fails_fast_on_structural_xml_error() {
    let dir = tempfile::tempdir().unwrap();

    let xml_path = dir.path().join("factura.xml");
    let mut xml = std::fs::File::create(&xml_path).unwrap();
    // Structurally broken on purpose; the XML stage must fail before the PDFs.
    write!(xml, "<Invoice></Invoice>").unwrap();

    let pdf_path = dir.path().join("factura.pdf");
    std::fs::write(&pdf_path, b"not a pdf").unwrap();

    Command::cargo_bin("concilia")
        .unwrap()
        .args([
            "process",
            "--xml",
            xml_path.to_str().unwrap(),
            "--pdf",
            pdf_path.to_str().unwrap(),
            "--oc",
            pdf_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invoice XML"));
}
