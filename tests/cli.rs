#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn configure_then_generate() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("inputs.json");
    let out_csv = dir.path().join("roster.csv");

    Command::cargo_bin("staffgrid-cli")
        .unwrap()
        .arg("--inputs")
        .arg(&inputs)
        .args([
            "configure",
            "--locations",
            "L1,L2",
            "--staff",
            "A,B,C,D",
            "--weekly-locations",
            "1",
        ])
        .assert()
        .success();

    Command::cargo_bin("staffgrid-cli")
        .unwrap()
        .arg("--inputs")
        .arg(&inputs)
        .args(["generate", "--seed", "3", "--out-csv"])
        .arg(&out_csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: All locations have at least one person assigned.",
        ));

    let csv = fs::read_to_string(&out_csv).unwrap();
    assert!(csv.starts_with("staff,Monday,Tuesday,Wednesday,Thursday,Friday"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn check_flags_short_days() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("inputs.json");
    let staff_csv = dir.path().join("staff.csv");
    fs::write(&staff_csv, "name,oof_days\nA,\nB,Tuesday\n").unwrap();

    Command::cargo_bin("staffgrid-cli")
        .unwrap()
        .arg("--inputs")
        .arg(&inputs)
        .args(["configure", "--locations", "L1,L2", "--weekly-locations", "1"])
        .assert()
        .success();

    Command::cargo_bin("staffgrid-cli")
        .unwrap()
        .arg("--inputs")
        .arg(&inputs)
        .arg("import-staff")
        .arg("--csv")
        .arg(&staff_csv)
        .assert()
        .success();

    Command::cargo_bin("staffgrid-cli")
        .unwrap()
        .arg("--inputs")
        .arg(&inputs)
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Tuesday: short by 1"))
        .stdout(predicate::str::contains("Monday: OK (2 available)"));
}
