use assert_cmd::Command;
use predicates::prelude::*;

fn dimcalc() -> Command {
    Command::cargo_bin("dimcalc").unwrap()
}

#[test]
fn test_cli_convert_linear() {
    dimcalc()
        .args(["convert", "1.5", "km", "mi"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1.5 km = 0.932"))
        .stdout(predicate::str::contains(" mi"));
}

#[test]
fn test_cli_convert_raw() {
    dimcalc()
        .args(["convert", "2", "kilogram", "g", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2000"));
}

#[test]
fn test_cli_convert_with_uncertainty() {
    dimcalc()
        .args(["convert", "1.5+-0.1", "km", "m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.5 ± 0.1 km = 1500 ± 100 m"));
}

#[test]
fn test_cli_convert_temperature() {
    dimcalc()
        .args(["convert", "-40", "degC", "degF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("= -40"));

    dimcalc()
        .args(["convert", "0", "K", "celsius", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-273.15"));
}

#[test]
fn test_cli_convert_to_chain() {
    dimcalc()
        .args(["convert", "1.5", "m", "ft & in"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.5 m = 4 ft + 11.05"));

    dimcalc()
        .args(["convert", "3725", "s", "h&min&s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 h + 2 min + 5 s"));
}

#[test]
fn test_cli_convert_to_chain_adds_back_up() {
    dimcalc()
        .args(["convert", "1", "m", "dm & mm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 m = 9 dm + 99.9"))
        .stdout(predicate::str::contains("10 dm").not());
}

#[test]
fn test_cli_convert_rejects_overflowing_amount() {
    dimcalc()
        .args(["convert", "1e999", "m", "ft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite number"));
}

#[test]
fn test_cli_convert_binary_prefix() {
    dimcalc()
        .args(["convert", "1", "MiB", "KiB", "-r"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1024"));
}

#[test]
fn test_cli_convert_dimension_mismatch() {
    dimcalc()
        .args(["convert", "1", "m", "s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dimension error"));
}

#[test]
fn test_cli_convert_rejects_affine_chain() {
    dimcalc()
        .args(["convert", "1", "K", "K & degC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incompatible unit"));
}

#[test]
fn test_cli_convert_invalid_amount() {
    dimcalc()
        .args(["convert", "lots", "m", "ft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_cli_compare() {
    dimcalc()
        .args(["compare", "1 km", "1 mi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 km < 1 mi"));
}

#[test]
fn test_cli_compare_overlap() {
    dimcalc()
        .args(["compare", "1+-0.5 m", "1.4+-0.5 m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<"));

    dimcalc()
        .args(["--overlap", "compare", "1+-0.5 m", "1.4+-0.5 m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1+-0.5 m = 1.4+-0.5 m"));
}

#[test]
fn test_cli_compare_dimension_mismatch() {
    dimcalc()
        .args(["compare", "1 m", "1 s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dimension error"));
}
