use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn doctype_lists_notation_identifiers() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("doctype")
        .arg(fixture("fixtures/notations.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "doctype name=r public=- system=urn:x-henrikmartensson:test",
        ))
        .stdout(predicate::str::contains("notations (7)"))
        .stdout(predicate::str::contains("- n1 public=TEST1 system=-"))
        .stdout(predicate::str::contains(
            "- n5 public=TEST5 system=urn:x-henrikmartensson.org:test5",
        ))
        .stdout(predicate::str::contains(
            "- n7 public=- system=urn:x-henrikmartensson.org:test7",
        ));
}

#[test]
fn doctype_lists_entities() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("doctype")
        .arg(fixture("fixtures/catalog_mirror_a.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("public=-//Example//DTD Catalog 1.0//EN"))
        .stdout(predicate::str::contains("- vendor value=\"Acme\""))
        .stdout(predicate::str::contains("- logo system=logo.png ndata=png"));
}

#[test]
fn doctype_json_output() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("doctype")
        .arg(fixture("fixtures/notations.xml"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"n6\""))
        .stdout(predicate::str::contains("\"public\": \"TEST6\""));
}

#[test]
fn doctype_absent_is_reported() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("doctype")
        .arg(fixture("fixtures/soap_expected.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("doctype=none"));
}
