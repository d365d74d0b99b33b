//! Integration tests verifying that log output is written to stderr.
//!
//! These tests exercise the production logging path by invoking the compiled
//! binary and asserting log messages appear on stderr rather than stdout.

use predicates::prelude::*;
use test_support::SourceTree;

/// Runner errors are logged to stderr and nothing reaches stdout.
#[test]
fn main_logs_errors_to_stderr() {
    let tree = SourceTree::with_files([("x.c", "#include \"gone.h\"\n")]).expect("tree");
    assert_cmd::cargo::cargo_bin_cmd!("mkdeps")
        .current_dir(tree.root())
        .arg("graph")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"))
        .stdout(predicate::str::is_empty());
}

/// Verbose logs go to stderr so piped Makefiles stay clean.
#[test]
fn verbose_logs_do_not_pollute_stdout() {
    let tree = SourceTree::with_files([("a.c", "#include \"a.h\"\n"), ("a.h", "")]).expect("tree");
    assert_cmd::cargo::cargo_bin_cmd!("mkdeps")
        .current_dir(tree.root())
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("expanding include"))
        .stdout(predicate::str::contains("DEBUG").not())
        .stdout(predicate::str::starts_with("SOURCES=a.c\n"));
}
