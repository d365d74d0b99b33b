//! Unit tests for the runner module's path resolution helpers.

use super::*;
use camino::Utf8PathBuf;
use rstest::rstest;
use std::borrow::Cow;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from_with_default(std::iter::once("mkdeps").chain(args.iter().copied()))
        .expect("parse")
}

#[rstest]
#[case(".", "Makefile", "Makefile")]
#[case("work", "Makefile", "work/Makefile")]
#[case("work", "/tmp/Makefile", "/tmp/Makefile")]
fn resolve_output_path_respects_directory(
    #[case] directory: &str,
    #[case] input: &str,
    #[case] expected: &str,
) {
    let resolved =
        resolve_output_path(Utf8Path::new(directory), Utf8Path::new(input)).expect("resolve");
    assert_eq!(&*resolved, Utf8Path::new(expected));
    assert_eq!(
        matches!(resolved, Cow::Borrowed(_)),
        directory == "." || input.starts_with('/')
    );
}

#[rstest]
fn output_path_without_file_name_is_rejected() {
    let err = resolve_output_path(Utf8Path::new("."), Utf8Path::new("out/.."))
        .expect_err("no file name");
    assert!(matches!(err, RunnerError::OutputMissingName { .. }));
}

#[rstest]
#[case(&[], ".")]
#[case(&["-C", "src"], "src")]
fn source_dir_defaults_to_working_directory(#[case] args: &[&str], #[case] expected: &str) {
    let dir = resolve_source_dir(&cli(args)).expect("utf8");
    assert_eq!(dir, Utf8PathBuf::from(expected));
}

#[rstest]
#[case(OnMissing::Abort, MissingFilePolicy::Abort)]
#[case(OnMissing::Skip, MissingFilePolicy::Skip)]
fn on_missing_maps_to_policy(#[case] flag: OnMissing, #[case] expected: MissingFilePolicy) {
    assert_eq!(MissingFilePolicy::from(flag), expected);
}

#[rstest]
fn custom_extensions_replace_defaults() {
    let tree = test_support::SourceTree::with_files([("a.c", ""), ("b.m", "")]).expect("tree");
    let dir = tree.open().expect("open");

    let graph = build_graph(&cli(&["--extension", "m"]), &dir).expect("graph");

    assert_eq!(graph.sources().collect::<Vec<_>>(), ["b.m"]);
}
