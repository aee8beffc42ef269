use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

const MIB: usize = 1024 * 1024;

/// 100 lines of exactly 1 MiB stamped 10:15:30, then one short line stamped 11:00:00.
fn large_log() -> String {
    let prefix = "[2024-03-05 10:15:30,123] INFO ";
    let line = format!("{prefix}{}\n", "x".repeat(MIB - prefix.len() - 1));
    let mut body = line.repeat(100);
    body.push_str("[2024-03-05 11:00:00,000] INFO tail\n");
    body
}

#[test]
fn requires_a_pattern() {
    let mut cmd = cargo_bin_cmd!("logsplit");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("PATTERN"));
}

#[test]
fn reports_missing_source_file() {
    let temp = assert_fs::TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("logsplit");
    cmd.current_dir(temp.path());
    cmd.args(["missing.log", "--output-dir", "out"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No files matched pattern 'missing.log'"));
    temp.child("out").assert(predicate::path::missing());
}

#[test]
fn skips_files_under_threshold() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    temp.child("small.log")
        .write_str("[2024-03-05 10:15:30,123] INFO start\n")
        .expect("write input");

    let mut cmd = cargo_bin_cmd!("logsplit");
    cmd.current_dir(temp.path());
    cmd.args(["small.log", "--output-dir", "out"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("small.log is 37 bytes"))
        .stdout(predicate::str::contains("skipping"))
        .stdout(predicate::str::contains("Split small.log").not())
        .stdout(predicate::str::contains("Finished: 0 chunk file(s) written"));
    temp.child("out").assert(predicate::path::missing());
}

#[test]
fn splits_large_file_without_overwriting() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let input = large_log();
    temp.child("big.log").write_str(&input).expect("write input");
    let out = temp.child("out");
    out.create_dir_all().expect("create out");
    out.child("2024-03-05_10-15-30.txt")
        .write_str("existing\n")
        .expect("write existing");

    let mut cmd = cargo_bin_cmd!("logsplit");
    cmd.current_dir(temp.path());
    cmd.args(["big.log", "-o", "out"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Split big.log into 2 chunk file(s)"))
        .stdout(predicate::str::contains("Created out/2024-03-05_10-15-30_1.txt"))
        .stdout(predicate::str::contains("Created out/2024-03-05_11-00-00.txt"))
        .stdout(predicate::str::contains("Finished: 2 chunk file(s) written"));

    out.child("2024-03-05_10-15-30.txt").assert("existing\n");
    let first = fs::read(out.child("2024-03-05_10-15-30_1.txt").path()).expect("read first");
    let second = fs::read(out.child("2024-03-05_11-00-00.txt").path()).expect("read second");
    assert_eq!(first.len(), 100 * MIB);
    assert_eq!(second, b"[2024-03-05 11:00:00,000] INFO tail\n");

    let mut rebuilt = first;
    rebuilt.extend_from_slice(&second);
    assert!(rebuilt == input.as_bytes(), "chunks must reproduce the input");
}
