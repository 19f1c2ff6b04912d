//! End-to-end tests running the `dirquery` executable.

use assert_cmd::Command;
use predicates::prelude::*;
use test_support::ScratchDir;

fn dirquery() -> Command {
    Command::cargo_bin("dirquery").expect("dirquery binary is built")
}

// ============================================================================
// Usage
// ============================================================================

#[test]
fn help_lists_both_commands() {
    dirquery()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("probe"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn version_names_the_program() {
    dirquery()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dirquery "));
}

#[test]
fn missing_command_exits_with_usage_status() {
    dirquery()
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn unknown_info_flag_exits_with_usage_status() {
    dirquery()
        .args(["--info", "transfer", "probe"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown info flag: transfer"));
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn probe_prints_every_section() {
    dirquery()
        .arg("probe")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[First Handle] List the contents of the directory...\n\
             RestartScan: false, Mask: (null), Result: 0, Filename: .\n",
        ))
        .stdout(predicate::str::contains(
            "RestartScan: true, Mask:  , Result: C000000F\n",
        ))
        .stdout(predicate::str::contains(
            "[Second Handle] Scan with a mask that doesn't match anything...\n\
             RestartScan: true, Mask: not-a-file.h, Result: C000000F\n",
        ))
        .stdout(predicate::str::ends_with(
            "RestartScan: false, Mask: (null), Result: 80000006\n\n",
        ));
}

#[test]
fn list_filters_by_mask() {
    let scratch = ScratchDir::with_headers().expect("scratch");
    scratch.write("readme.md", b"docs").expect("write");

    dirquery()
        .arg("list")
        .arg(scratch.path())
        .args(["--mask", "*.h", "--single"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a-file.h"))
        .stdout(predicate::str::contains("another-file.h"))
        .stdout(predicate::str::contains("readme.md").not());
}

#[test]
fn list_of_a_file_fails_with_not_a_directory() {
    let scratch = ScratchDir::with_headers().expect("scratch");

    dirquery()
        .arg("list")
        .arg(scratch.path().join("a-file.h"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("dirquery: "))
        .stderr(predicate::str::contains("is not a directory"));
}
