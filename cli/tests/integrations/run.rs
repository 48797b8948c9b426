use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn dimcalc() -> Command {
    Command::cargo_bin("dimcalc").unwrap()
}

#[test]
fn test_cli_lookup_unit() {
    dimcalc()
        .arg("lookup")
        .arg("meter")
        .assert()
        .success()
        .stdout(predicate::str::contains("meter"))
        .stdout(predicate::str::contains("linear"))
        .stdout(predicate::str::contains("SI"));
}

#[test]
fn test_cli_lookup_prefixed_unit() {
    dimcalc()
        .arg("lookup")
        .arg("kilometer")
        .assert()
        .success()
        .stdout(predicate::str::contains("prefixed"))
        .stdout(predicate::str::contains("kilo"))
        .stdout(predicate::str::contains("1000 L"));
}

#[test]
fn test_cli_lookup_dimension() {
    dimcalc()
        .arg("lookup")
        .arg("speed")
        .assert()
        .success()
        .stdout(predicate::str::contains("velocity, speed"))
        .stdout(predicate::str::contains("L T^-1"));
}

#[test]
fn test_cli_lookup_prefix_set() {
    dimcalc()
        .arg("lookup")
        .arg("IEC")
        .assert()
        .success()
        .stdout(predicate::str::contains("kibi"))
        .stdout(predicate::str::contains("Ki"));
}

#[test]
fn test_cli_lookup_unknown_name() {
    dimcalc()
        .arg("lookup")
        .arg("not_a_real_unit_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No unit found"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_cli_prefix_must_be_allowed() {
    dimcalc()
        .arg("lookup")
        .arg("ks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No unit found for 'ks'"));

    dimcalc()
        .arg("--allow-any-prefix")
        .arg("lookup")
        .arg("ks")
        .assert()
        .success()
        .stdout(predicate::str::contains("kilosecond"));
}

#[test]
fn test_cli_list_all_units() {
    dimcalc()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("meter"))
        .stdout(predicate::str::contains("fahrenheit"))
        .stdout(predicate::str::contains("affine"))
        .stdout(predicate::str::contains("logarithmic"));
}

#[test]
fn test_cli_list_by_dimension() {
    dimcalc()
        .arg("list")
        .arg("--dimension")
        .arg("time")
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("minute"))
        .stdout(predicate::str::contains("meter").not());
}

#[test]
fn test_cli_list_dimension_without_units() {
    dimcalc()
        .arg("list")
        .arg("-D")
        .arg("acceleration")
        .assert()
        .success()
        .stdout(predicate::str::contains("No units found"));
}

#[test]
fn test_cli_export_is_json() {
    let output = dimcalc().arg("export").output().unwrap();
    assert!(output.status.success());

    let exported: Value = serde_json::from_slice(&output.stdout).unwrap();
    let units = exported["units"].as_array().unwrap();
    assert!(units
        .iter()
        .any(|u| u["names"][0] == "celsius" && u["symbols"][0] == "°C"));
    assert!(exported["dimensions"].as_array().unwrap().len() > 10);
}
