//! Dependency graph construction.
//!
//! [`DependencyGraph::build`] resolves every discovered source with a fresh
//! visited set and records the source followed by its prerequisites. The
//! graph keeps insertion order so emitted rules follow the order sources were
//! supplied in.

use crate::resolver::{PrerequisiteList, ResolveError, Resolver};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use tracing::{debug, warn};

/// What to do when a source cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingFilePolicy {
    /// Stop at the first failing source.
    #[default]
    Abort,
    /// Log the failure, leave the source out and carry on.
    Skip,
}

/// Options controlling [`DependencyGraph::build`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Handling of sources whose resolution fails.
    pub on_missing: MissingFilePolicy,
    /// Log a warning for every include cycle met.
    pub warn_cycles: bool,
}

/// Mapping from each source file to everything its object depends on.
///
/// Every list starts with the source itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    entries: IndexMap<String, PrerequisiteList>,
    #[serde(skip)]
    skipped: Vec<String>,
}

impl DependencyGraph {
    /// Resolve each of `sources` and collect the results.
    ///
    /// Repeated sources are resolved once.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`] when `options.on_missing` is
    /// [`MissingFilePolicy::Abort`].
    pub fn build<I, S>(
        resolver: &Resolver<'_>,
        sources: I,
        options: GraphOptions,
    ) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::default();
        for entry in sources {
            let source = entry.as_ref();
            if graph.entries.contains_key(source) {
                continue;
            }
            let resolution = match resolver.resolve_root(source) {
                Ok(resolution) => resolution,
                Err(err) if options.on_missing == MissingFilePolicy::Skip => {
                    warn!(source, error = %err, "skipping source");
                    graph.skipped.push(source.to_owned());
                    continue;
                }
                Err(err) => return Err(err),
            };
            if options.warn_cycles {
                for cycle in &resolution.cycles {
                    warn!(source, %cycle, "include cycle");
                }
            }
            debug!(source, count = resolution.prerequisites.len(), "resolved");
            graph.insert(source, resolution.prerequisites.with_leading(source));
        }
        Ok(graph)
    }

    /// Add `source` with its prerequisites.
    ///
    /// Returns `false`, leaving the graph untouched, when `source` is already
    /// present.
    pub fn insert(&mut self, source: impl Into<String>, prerequisites: PrerequisiteList) -> bool {
        match self.entries.entry(source.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(prerequisites);
                true
            }
        }
    }

    /// Prerequisites recorded for `source`.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&PrerequisiteList> {
        self.entries.get(source)
    }

    /// Iterate over `(source, prerequisites)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrerequisiteList)> {
        self.entries.iter().map(|(source, list)| (source.as_str(), list))
    }

    /// Source files in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sources left out because they could not be resolved.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Number of sources in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the graph as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Wrap the graph for Graphviz DOT rendering.
    #[must_use]
    pub const fn dot(&self) -> DotGraph<'_> {
        DotGraph { graph: self }
    }
}

/// Graphviz DOT view of a [`DependencyGraph`].
#[derive(Debug, Clone, Copy)]
pub struct DotGraph<'a> {
    graph: &'a DependencyGraph,
}

impl Display for DotGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph mkdeps {{")?;
        for (source, prerequisites) in self.graph.iter() {
            writeln!(f, "  {source:?};")?;
            for dep in prerequisites.iter().filter(|dep| dep.as_str() != source) {
                writeln!(f, "  {source:?} -> {dep:?};")?;
            }
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use test_support::SourceTree;

    fn list(paths: &[&str]) -> PrerequisiteList {
        paths.iter().map(|p| (*p).to_owned()).collect()
    }

    #[rstest]
    fn visited_sets_are_not_shared_between_sources() {
        let tree = SourceTree::with_files([
            ("a.c", "#include \"common.h\"\n"),
            ("b.c", "#include \"common.h\"\n"),
            ("common.h", "#include \"types.h\"\n"),
            ("types.h", ""),
        ])
        .expect("tree");
        let dir = tree.open().expect("open");
        let resolver = Resolver::new(&dir);

        let graph = DependencyGraph::build(&resolver, ["a.c", "b.c"], GraphOptions::default())
            .expect("build");

        assert_eq!(
            graph.get("a.c"),
            Some(&list(&["a.c", "common.h", "types.h"]))
        );
        assert_eq!(
            graph.get("b.c"),
            Some(&list(&["b.c", "common.h", "types.h"]))
        );
    }

    #[rstest]
    fn repeated_sources_are_resolved_once() {
        let tree = SourceTree::with_files([("a.c", "")]).expect("tree");
        let dir = tree.open().expect("open");
        let resolver = Resolver::new(&dir);

        let graph = DependencyGraph::build(&resolver, ["a.c", "a.c"], GraphOptions::default())
            .expect("build");

        assert_eq!(graph.len(), 1);
    }

    #[rstest]
    #[case(MissingFilePolicy::Abort, None)]
    #[case(MissingFilePolicy::Skip, Some(vec!["good.c"]))]
    fn missing_include_follows_policy(
        #[case] on_missing: MissingFilePolicy,
        #[case] expected: Option<Vec<&str>>,
    ) {
        let tree = SourceTree::with_files([
            ("bad.c", "#include \"missing.h\"\n"),
            ("good.c", ""),
        ])
        .expect("tree");
        let dir = tree.open().expect("open");
        let options = GraphOptions {
            on_missing,
            warn_cycles: false,
        };
        let resolver = Resolver::new(&dir);

        let outcome = DependencyGraph::build(&resolver, ["bad.c", "good.c"], options);

        match expected {
            None => {
                let err = outcome.expect_err("abort on missing include");
                assert_eq!(err.path(), "missing.h");
            }
            Some(sources) => {
                let graph = outcome.expect("skip missing include");
                assert_eq!(graph.sources().collect::<Vec<_>>(), sources);
                assert_eq!(graph.skipped(), ["bad.c"]);
            }
        }
    }

    #[rstest]
    fn insert_refuses_duplicates() {
        let mut graph = DependencyGraph::default();
        assert!(graph.insert("a.c", list(&["a.c"])));
        assert!(!graph.insert("a.c", list(&["a.c", "x.h"])));
        assert_eq!(graph.get("a.c"), Some(&list(&["a.c"])));
    }

    #[rstest]
    fn json_keeps_insertion_order() {
        let mut graph = DependencyGraph::default();
        graph.insert("z.c", list(&["z.c", "z.h"]));
        graph.insert("a.c", list(&["a.c"]));

        let json = graph.to_json().expect("json");

        assert_eq!(
            json,
            "{\n  \"z.c\": [\n    \"z.c\",\n    \"z.h\"\n  ],\n  \"a.c\": [\n    \"a.c\"\n  ]\n}"
        );
    }

    #[rstest]
    fn dot_skips_self_edges() {
        let mut graph = DependencyGraph::default();
        graph.insert("main.c", list(&["main.c", "util.h"]));

        let dot = graph.dot().to_string();

        assert_eq!(
            dot,
            concat!(
                "digraph mkdeps {\n",
                "  \"main.c\";\n",
                "  \"main.c\" -> \"util.h\";\n",
                "}\n",
            )
        );
    }
}
