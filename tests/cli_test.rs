//! End-to-end tests that create data files on the fly and run the full
//! binary against them.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn get_cmd() -> Command {
    Command::cargo_bin("ledgerbook").unwrap()
}

const VALID_ADDRESS_BOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<addressbook>
    <persons>
        <name>John Doe</name>
        <phone>98765432</phone>
        <email>johnd@example.com</email>
        <address>311, Clementi Ave 2, #02-25</address>
        <tagged>friends</tagged>
    </persons>
</addressbook>
"#;

const VALID_TRACKER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<expendituretracker>
    <expenditures>
        <description>Lunch</description>
        <date>01-11-2018</date>
        <money>5.50</money>
    </expenditures>
</expendituretracker>
"#;

#[test]
fn init_creates_an_empty_address_book() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("addressbook.xml");

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "init", "--kind", "addressbook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created empty address book"));

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("addressbook"));

    // A second init must not clobber the file.
    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "init", "--kind", "addressbook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("left untouched"));
}

#[test]
fn init_requires_a_kind() {
    let dir = tempdir().unwrap();
    get_cmd()
        .args(["--file"])
        .arg(dir.path().join("data.xml"))
        .args(["--operation", "init"])
        .assert()
        .failure();
}

#[test]
fn check_passes_on_a_valid_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("addressbook.xml");
    fs::write(&file, VALID_ADDRESS_BOOK).unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("looks good"));
}

#[test]
fn check_detects_tracker_kind_from_content() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("records.xml");
    fs::write(&file, VALID_TRACKER).unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "check"])
        .assert()
        .success();
}

#[test]
fn check_reports_field_errors_and_fails() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("addressbook.xml");
    fs::write(
        &file,
        r#"<addressbook>
    <persons>
        <name>John Doe</name>
        <phone>12</phone>
        <email>johnd@example.com</email>
        <address>311, Clementi Ave 2</address>
    </persons>
</addressbook>"#,
    )
    .unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("person #1"))
        .stdout(predicate::str::contains("Phone numbers"));
}

#[test]
fn check_on_a_missing_file_is_not_an_error() {
    let dir = tempdir().unwrap();
    get_cmd()
        .args(["--file"])
        .arg(dir.path().join("nothing.xml"))
        .args(["--operation", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to check"));
}

#[test]
fn check_fails_on_unknown_root_element() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("other.xml");
    fs::write(&file, "<ledger><row/></ledger>").unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "check"])
        .assert()
        .failure();
}

#[test]
fn backup_copies_the_data_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("expendituretracker.xml");
    fs::write(&file, VALID_TRACKER).unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up 1 record(s)"));

    let backup = dir.path().join("expendituretracker.xml.backup");
    assert!(backup.exists());
    assert!(
        fs::read_to_string(backup)
            .unwrap()
            .contains("<description>Lunch</description>")
    );
}

#[test]
fn backup_of_a_missing_file_fails() {
    let dir = tempdir().unwrap();
    get_cmd()
        .args(["--file"])
        .arg(dir.path().join("nothing.xml"))
        .args(["--operation", "backup"])
        .assert()
        .failure();
}

#[test]
fn export_writes_pretty_json() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("addressbook.xml");
    fs::write(&file, VALID_ADDRESS_BOOK).unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 record(s)"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("addressbook.json")).unwrap())
            .unwrap();
    assert_eq!(json["persons"][0]["name"], "John Doe");
    assert_eq!(json["persons"][0]["tagged"][0], "friends");
}

#[test]
fn export_honors_the_output_flag() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("expendituretracker.xml");
    let out = dir.path().join("dump/records.json");
    fs::write(&file, VALID_TRACKER).unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "export", "--output"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["expenditures"][0]["money"], "5.50");
}

#[test]
fn conversion_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("addressbook.xml");
    fs::write(&file, "<addressbook><persons></addressbook>").unwrap();

    get_cmd()
        .args(["--file"])
        .arg(&file)
        .args(["--operation", "export"])
        .assert()
        .failure();
}
