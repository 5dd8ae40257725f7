use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn compare_equivalent_documents_succeeds() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected_decl.xml"))
        .arg(fixture("fixtures/soap_reprefixed.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("= equivalent"))
        .stdout(predicate::str::contains("expected tree").not());
}

#[test]
fn compare_reports_first_difference_and_fails() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(fixture("fixtures/soap_actual.xml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "! not equivalent at /soap:Envelope/soap:Body/TestThing/SomeStringValue (node #4)",
        ))
        .stdout(predicate::str::contains("actual document has fewer nodes"))
        .stdout(predicate::str::contains("expected tree"))
        .stdout(predicate::str::contains("actual tree"))
        .stderr(predicate::str::contains("are not equivalent"));
}

#[test]
fn compare_no_trees_omits_outlines() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(fixture("fixtures/soap_actual.xml"))
        .arg("--no-trees")
        .assert()
        .failure()
        .stdout(predicate::str::contains("expected tree").not());
}

#[test]
fn compare_quiet_prints_summary_line() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(fixture("fixtures/soap_actual.xml"))
        .arg("--quiet")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "equivalent=false position=4 path=/soap:Envelope/soap:Body/TestThing/SomeStringValue",
        ));
}

#[test]
fn compare_json_output() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/catalog_urn.xml"))
        .arg(fixture("fixtures/catalog_mirror_a.xml"))
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"verdict\": \"mismatch\""))
        .stdout(predicate::str::contains("\"kind\": \"doc_type\""))
        .stdout(predicate::str::contains("\"rule\": \"system_id\""));
}

#[test]
fn compare_doctype_url_mirrors_are_equivalent() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/catalog_mirror_a.xml"))
        .arg(fixture("fixtures/catalog_mirror_b.xml"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("equivalent=true"));
}

#[test]
fn compare_reads_format_from_local_config() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    fs::write(
        dir.path().join("xml-equiv.toml"),
        "[report]\nformat = \"json\"\ncolor = false\n",
    )
    .expect("config should be written");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.current_dir(dir.path())
        .arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(fixture("fixtures/soap_expected.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"verdict\": \"equivalent\""));
}

#[test]
fn compare_cli_format_overrides_config() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[report]\nformat = \"json\"\n").expect("config should be written");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("= equivalent"));
}

#[test]
fn compare_warns_and_falls_back_on_bad_config() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[report\n").expect("config should be written");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: failed to parse config file"))
        .stdout(predicate::str::contains("= equivalent"));
}

#[test]
fn compare_reports_parse_failures_with_path() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let broken = dir.path().join("broken.xml");
    fs::write(&broken, "<a><b></a>").expect("xml should be written");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equiv"));
    cmd.arg("compare")
        .arg(fixture("fixtures/soap_expected.xml"))
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("broken.xml"));
}
