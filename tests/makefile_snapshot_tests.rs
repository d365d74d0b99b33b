//! Snapshot tests for generated Makefiles.
//!
//! A small source tree is resolved end to end and the emitted Makefile is
//! compared with stored `insta` snapshots, one per object naming mode.

use insta::{Settings, assert_snapshot};
use mkdeps::graph::{DependencyGraph, GraphOptions};
use mkdeps::makefile::{self, MakefileOptions};
use mkdeps::resolver::Resolver;
use mkdeps::scan::{self, DEFAULT_EXTENSIONS};
use rstest::{fixture, rstest};
use test_support::SourceTree;

#[fixture]
fn tree() -> SourceTree {
    SourceTree::with_files([
        ("main.c", "#include <stdio.h>\n#include \"list.h\"\n#include \"main.h\"\n"),
        ("main.h", "#include \"list.h\"\n#include \"util/str.h\"\n"),
        ("list.c", "#include \"list.h\"\n"),
        ("list.h", "#include <stddef.h>\n"),
        ("util/str.h", ""),
    ])
    .expect("source tree")
}

fn render(tree: &SourceTree, options: &MakefileOptions) -> String {
    let dir = tree.open().expect("open tree");
    let sources = scan::discover_sources(&dir, &DEFAULT_EXTENSIONS).expect("scan");
    let graph = DependencyGraph::build(&Resolver::new(&dir), &sources, GraphOptions::default())
        .expect("resolve");
    makefile::generate(&graph, options).expect("render")
}

fn settings() -> Settings {
    let mut settings = Settings::new();
    settings.set_snapshot_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/snapshots/makefile"
    ));
    settings
}

#[rstest]
fn default_makefile(tree: SourceTree) {
    let makefile = render(&tree, &MakefileOptions::default());
    settings().bind(|| {
        assert_snapshot!("default_makefile", makefile);
    });
}

#[rstest]
fn unprefixed_objects(tree: SourceTree) {
    let options = MakefileOptions {
        prefix_objects: false,
        ..MakefileOptions::default()
    };
    let makefile = render(&tree, &options);
    settings().bind(|| {
        assert_snapshot!("unprefixed_objects", makefile);
    });
}
