//! Source discovery.
//!
//! Lists the regular files directly inside the source directory and keeps
//! those whose extension marks them as compilable units. Subdirectories are
//! not descended into; headers they contain are still reachable through
//! include directives.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::debug;

mod error;

pub use error::ScanError;

/// Extensions treated as compilable sources when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["c", "cc", "cpp", "cxx"];

/// Open `path` as the capability root for all source reads.
///
/// # Errors
///
/// Returns [`ScanError::OpenDir`] if the directory cannot be opened.
pub fn open_source_dir(path: &Utf8Path) -> Result<Dir, ScanError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| ScanError::OpenDir {
        path: path.to_owned(),
        source,
    })
}

/// Return the names of files in `root` whose extension is in `extensions`.
///
/// Names are sorted so repeated runs emit identical output. Entries that are
/// not regular files or whose names are not UTF-8 are skipped.
///
/// # Errors
///
/// Returns [`ScanError::ReadDir`] if the directory cannot be listed.
pub fn discover_sources<S: AsRef<str>>(
    root: &Dir,
    extensions: &[S],
) -> Result<Vec<String>, ScanError> {
    let entries = root.entries().map_err(|source| ScanError::ReadDir { source })?;
    let mut sources = Vec::new();
    for item in entries {
        let entry = item.map_err(|source| ScanError::ReadDir { source })?;
        let Ok(name) = entry.file_name() else {
            debug!("skipping entry with non-UTF-8 name");
            continue;
        };
        if !has_source_extension(&name, extensions) {
            continue;
        }
        let is_file = entry
            .file_type()
            .map_err(|source| ScanError::ReadDir { source })?
            .is_file();
        if is_file {
            sources.push(name);
        } else {
            debug!(name, "skipping non-file entry");
        }
    }
    sources.sort();
    Ok(sources)
}

/// Whether `name` ends in one of `extensions` (compared case-sensitively).
///
/// Extensions may be given with or without their leading dot.
#[must_use]
pub fn has_source_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    Utf8Path::new(name).extension().is_some_and(|ext| {
        extensions.iter().any(|want| {
            let wanted = want.as_ref();
            wanted.strip_prefix('.').unwrap_or(wanted) == ext
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use test_support::SourceTree;

    #[rstest]
    #[case("main.c", true)]
    #[case("engine.cpp", true)]
    #[case("list.cxx", true)]
    #[case("vec.cc", true)]
    #[case("list.h", false)]
    #[case("MAIN.C", false)]
    #[case("Makefile", false)]
    #[case("archive.c.orig", false)]
    fn classifies_default_extensions(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(has_source_extension(name, &DEFAULT_EXTENSIONS), expected);
    }

    #[rstest]
    #[case(&[".c"], "main.c", true)]
    #[case(&[".c", "m"], "view.m", true)]
    #[case(&[".c"], "main.cpp", false)]
    fn dotted_extensions_are_accepted(
        #[case] extensions: &[&str],
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(has_source_extension(name, extensions), expected);
    }

    #[rstest]
    fn lists_sorted_top_level_sources_only() {
        let tree = SourceTree::with_files([
            ("zeta.c", ""),
            ("alpha.cpp", ""),
            ("alpha.h", ""),
            ("notes.txt", ""),
            ("nested/inner.c", ""),
        ])
        .expect("tree");
        let dir = tree.open().expect("open");

        let sources = discover_sources(&dir, &DEFAULT_EXTENSIONS).expect("scan");

        assert_eq!(sources, ["alpha.cpp", "zeta.c"]);
    }

    #[rstest]
    fn directories_with_source_extensions_are_skipped() {
        let tree = SourceTree::with_files([("odd.c/inside.h", ""), ("real.c", "")]).expect("tree");
        let dir = tree.open().expect("open");

        let sources = discover_sources(&dir, &["c"]).expect("scan");

        assert_eq!(sources, ["real.c"]);
    }

    #[rstest]
    fn missing_directory_reports_path() {
        let tree = SourceTree::new().expect("tree");
        let missing = tree.root().join("absent");

        let err = open_source_dir(&missing).expect_err("absent dir");

        assert!(err.to_string().contains("absent"), "{err}");
    }
}
