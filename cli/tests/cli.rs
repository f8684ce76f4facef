//! End-to-end tests for the `cbfg` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn cbfg_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cbfg"));
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("CBFG_OUTPUT_DIR")
        .env_remove("CBFG_CHAR_LIMIT")
        .env_remove("RUST_LOG");
    cmd
}

/// A workspace with the scanned tree under `proj/` and bundles landing in
/// the workspace root.
fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir_all(&root).unwrap();
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn bundle_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("bundled_codebase_"))
        .collect();
    names.sort();
    names
}

#[test]
fn version_output() {
    let dir = tempdir().unwrap();
    cbfg_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cbfg"));
}

#[test]
fn missing_directory_argument_exits_with_one() {
    let dir = tempdir().unwrap();
    cbfg_cmd(dir.path()).assert().code(1);
    assert!(bundle_files(dir.path()).is_empty());
}

#[test]
fn small_tree_lands_in_a_single_bundle() {
    let ws = workspace(&[("a.txt", "hello"), ("b.txt", "world"), ("sub/c.txt", "!")]);
    cbfg_cmd(ws.path())
        .args(["proj", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total number of files processed: 3"))
        .stdout(predicate::str::contains("Total number of bundles written: 1"))
        .stdout(predicate::str::contains("paste the entire codebase in 1 part(s)"));

    assert_eq!(bundle_files(ws.path()), vec!["bundled_codebase_1.txt"]);
    let bundle = fs::read_to_string(ws.path().join("bundled_codebase_1.txt")).unwrap();
    assert!(bundle.contains("\n```\nhello\n```\n"));
    assert!(bundle.contains("\n```\nworld\n```\n"));
    assert!(bundle.contains("\n```\n!\n```\n"));
    assert_eq!(bundle.matches("// File: ").count(), 3);
}

#[test]
fn entries_over_the_limit_split_into_two_bundles() {
    let big = "a".repeat(20_000);
    let ws = workspace(&[("one.txt", big.as_str()), ("two.txt", big.as_str())]);
    cbfg_cmd(ws.path())
        .args(["proj", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total number of bundles written: 2"));

    let names = bundle_files(ws.path());
    assert_eq!(
        names,
        vec!["bundled_codebase_1.txt", "bundled_codebase_2.txt"]
    );
    for name in names {
        let bundle = fs::read_to_string(ws.path().join(name)).unwrap();
        assert_eq!(bundle.matches("// File: ").count(), 1);
    }
}

#[test]
fn ignored_directory_is_pruned() {
    let ws = workspace(&[("keep.txt", "kept"), ("dir/x.txt", "hidden")]);
    cbfg_cmd(ws.path())
        .args(["proj", "dir/", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total number of files processed: 1"))
        .stderr(predicate::str::contains("Skipping directory"))
        .stderr(predicate::str::contains("x.txt").not());

    let bundle = fs::read_to_string(ws.path().join("bundled_codebase_1.txt")).unwrap();
    assert!(bundle.contains("kept"));
    assert!(!bundle.contains("hidden"));
}

#[test]
fn basename_rule_skips_matching_files_anywhere() {
    let ws = workspace(&[("a.lock", "lock"), ("nested/a.lock", "lock"), ("main.rs", "fn main() {}")]);
    cbfg_cmd(ws.path())
        .args(["proj", "a.lock", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total number of files processed: 1"));
}

#[test]
fn non_utf8_file_is_skipped_with_a_warning() {
    let ws = workspace(&[("ok.txt", "fine")]);
    fs::write(ws.path().join("proj").join("bad.bin"), [0xff_u8, 0xfe, 0x00, 0x80]).unwrap();
    cbfg_cmd(ws.path())
        .args(["proj", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("is not UTF-8 compatible"))
        .stdout(predicate::str::contains("Total number of files processed: 1"));
}

#[test]
fn declining_the_prompt_writes_nothing() {
    let ws = workspace(&[("a.txt", "hello")]);
    cbfg_cmd(ws.path())
        .arg("proj")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Are you sure you want to scan"))
        .stdout(predicate::str::contains("Total number of bundles").not())
        .stderr(predicate::str::contains("Operation cancelled by user."));
    assert!(bundle_files(ws.path()).is_empty());
}

#[test]
fn confirming_the_prompt_runs_the_scan() {
    let ws = workspace(&[("a.txt", "hello")]);
    cbfg_cmd(ws.path())
        .arg("proj")
        .write_stdin("Yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total number of bundles written: 1"));
    assert_eq!(bundle_files(ws.path()), vec!["bundled_codebase_1.txt"]);
}

#[test]
fn closed_stdin_counts_as_no() {
    let ws = workspace(&[("a.txt", "hello")]);
    cbfg_cmd(ws.path())
        .arg("proj")
        .write_stdin("")
        .assert()
        .success();
    assert!(bundle_files(ws.path()).is_empty());
}

#[test]
fn nonexistent_root_exits_with_one() {
    let dir = tempdir().unwrap();
    cbfg_cmd(dir.path())
        .args(["does-not-exist", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
    assert!(bundle_files(dir.path()).is_empty());
}

#[test]
fn file_as_root_exits_with_one() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("plain.txt"), "x").unwrap();
    cbfg_cmd(dir.path())
        .args(["plain.txt", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn zero_char_limit_is_a_usage_error() {
    let ws = workspace(&[("a.txt", "hello")]);
    cbfg_cmd(ws.path())
        .args(["proj", "--yes", "--char-limit", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Character limit must be greater than 0"));
    assert!(bundle_files(ws.path()).is_empty());
}

#[test]
fn output_dir_and_prefix_are_honoured() {
    let ws = workspace(&[("a.txt", "hello")]);
    cbfg_cmd(ws.path())
        .args(["proj", "--yes", "-o", "out/bundles", "--prefix", "part"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundles written to directory:"));
    assert!(ws.path().join("out/bundles/part_1.txt").is_file());
    assert!(bundle_files(ws.path()).is_empty());
}

#[test]
fn json_summary_is_machine_readable() {
    let ws = workspace(&[("a.txt", "hello"), ("b.txt", "world")]);
    let output = cbfg_cmd(ws.path())
        .args(["proj", "--yes", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["filesProcessed"], 2);
    assert_eq!(summary["bundlesWritten"], 1);
    assert_eq!(summary["bundlePaths"].as_array().map(|a| a.len()), Some(1));
}

#[test]
fn quiet_hides_progress_but_keeps_warnings() {
    let ws = workspace(&[("ok.txt", "fine")]);
    fs::write(ws.path().join("proj").join("bad.bin"), [0xff_u8, 0xfe]).unwrap();
    cbfg_cmd(ws.path())
        .args(["proj", "--yes", "--quiet", "--progress-every", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files").not())
        .stdout(predicate::str::contains("Bundle 1 written.").not())
        .stderr(predicate::str::contains("is not UTF-8 compatible"));
}
