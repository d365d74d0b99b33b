//! Transitive include resolution.
//!
//! The [`Resolver`] reads a file from the source directory, extracts its
//! include directives and recursively expands every target it has not seen
//! before. A [`VisitedSet`] threaded through the recursion bounds the work to
//! one expansion per file, which also makes include cycles terminate.
//!
//! Ordering rules:
//!
//! - prerequisites appear in first-discovered order, each expanded target
//!   followed by its own prerequisites;
//! - a target sharing the resolved file's stem (`foo.c` and `foo.h`) is moved
//!   to the front, both among direct includes before expansion and across the
//!   final list;
//! - duplicates keep their first position.
//!
//! Paths are compared as raw strings, so `./foo.h` and `foo.h` are distinct.
//!
//! # Examples
//!
//! ```no_run
//! use cap_std::{ambient_authority, fs_utf8::Dir};
//! use mkdeps::resolver::Resolver;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = Dir::open_ambient_dir("src", ambient_authority())?;
//! let resolution = Resolver::new(&dir).resolve_root("main.c")?;
//! for path in &resolution.prerequisites {
//!     println!("{path}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::{Referrer, ResolveError};

use crate::include::{self, IncludeDirective, IncludeForm};
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use indexmap::IndexSet;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// Files already expanded during one top-level resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    paths: HashSet<String>,
}

impl VisitedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing only `file`.
    #[must_use]
    pub fn rooted(file: &str) -> Self {
        let mut set = Self::new();
        set.insert(file);
        set
    }

    /// Record `path`, returning `true` if it was not already present.
    pub fn insert(&mut self, path: &str) -> bool {
        if self.paths.contains(path) {
            return false;
        }
        self.paths.insert(path.to_owned())
    }

    /// Whether `path` has been recorded.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of recorded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no path has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Ordered, duplicate-free prerequisites of one file.
///
/// Collecting into a list keeps the first occurrence of each path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrerequisiteList {
    paths: Vec<String>,
}

impl PrerequisiteList {
    /// View the paths in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    /// Iterate over the paths in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.paths.iter()
    }

    /// Number of prerequisites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether `path` is one of the prerequisites.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Return a list starting with `path`, dropping any later copy of it.
    #[must_use]
    pub fn with_leading(self, path: &str) -> Self {
        std::iter::once(path.to_owned()).chain(self.paths).collect()
    }
}

impl FromIterator<String> for PrerequisiteList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let unique: IndexSet<String> = iter.into_iter().collect();
        Self {
            paths: unique.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PrerequisiteList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A chain of includes leading back to its first file.
///
/// The chain is rotated so the lexically smallest file comes first, giving a
/// stable form regardless of where the walk entered the loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IncludeCycle {
    files: Vec<String>,
}

impl IncludeCycle {
    fn from_chain(mut chain: Vec<String>) -> Self {
        if chain.len() > 2 {
            let open = chain.len() - 1;
            let start = chain
                .iter()
                .take(open)
                .position_min()
                .unwrap_or_default();
            let (ring, closing) = chain.split_at_mut(open);
            ring.rotate_left(start);
            if let (Some(first), Some(last)) = (ring.first(), closing.first_mut()) {
                last.clone_from(first);
            }
        }
        Self { files: chain }
    }

    /// Files along the cycle; the first file is repeated at the end.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Whether this is `file` including itself directly.
    #[must_use]
    pub fn is_self_include_of(&self, file: &str) -> bool {
        matches!(self.files.as_slice(), [a, b] if a == file && b == file)
    }
}

impl Display for IncludeCycle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.files.iter().join(" -> "))
    }
}

/// Prerequisites of a top-level file plus the include cycles met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Deduplicated, ordered prerequisites.
    pub prerequisites: PrerequisiteList,
    /// Include cycles detected during the walk.
    pub cycles: Vec<IncludeCycle>,
}

/// Tunables for [`Resolver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Treat missing `<...>` targets as errors instead of system headers.
    pub strict_system_includes: bool,
}

/// Resolves the transitive includes of files in one source directory.
#[derive(Debug)]
pub struct Resolver<'dir> {
    root: &'dir Dir,
    options: ResolveOptions,
}

struct Walk<'v> {
    visited: &'v mut VisitedSet,
    stack: Vec<String>,
    cycles: Vec<IncludeCycle>,
}

impl<'v> Walk<'v> {
    const fn new(visited: &'v mut VisitedSet) -> Self {
        Self {
            visited,
            stack: Vec::new(),
            cycles: Vec::new(),
        }
    }

    /// Build the cycle closed by `target` when it is still being expanded.
    fn cycle_through(&self, target: &str) -> Option<IncludeCycle> {
        let start = self.stack.iter().position(|p| p == target)?;
        let mut chain: Vec<String> = self.stack.iter().skip(start).cloned().collect();
        chain.push(target.to_owned());
        Some(IncludeCycle::from_chain(chain))
    }
}

impl<'dir> Resolver<'dir> {
    /// Create a resolver reading files from `root`.
    #[must_use]
    pub fn new(root: &'dir Dir) -> Self {
        Self {
            root,
            options: ResolveOptions::default(),
        }
    }

    /// Replace the resolver options.
    #[must_use]
    pub const fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the prerequisites of `file`, sharing `visited` with the caller.
    ///
    /// An empty `visited` marks a top-level call: it is seeded with `file`,
    /// and `file` is left out of the result unless it includes itself
    /// directly. Otherwise targets already in `visited` are listed but not
    /// expanded again, and `file` may appear when it is reached through a
    /// cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingFile`] when `file` or any expanded
    /// target does not exist, and [`ResolveError::UnreadableFile`] when one
    /// cannot be read.
    pub fn resolve(
        &self,
        file: &str,
        visited: &mut VisitedSet,
    ) -> Result<PrerequisiteList, ResolveError> {
        let top_level = visited.is_empty();
        if top_level {
            visited.insert(file);
        }
        self.walk(file, visited, top_level)
            .map(|resolution| resolution.prerequisites)
    }

    /// Resolve `file` as a top-level source with a fresh visited set.
    ///
    /// `file` is left out of its own prerequisites unless it includes itself
    /// directly. Include cycles met on the way are returned alongside.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn resolve_root(&self, file: &str) -> Result<Resolution, ResolveError> {
        let mut visited = VisitedSet::rooted(file);
        self.walk(file, &mut visited, true)
    }

    fn walk(
        &self,
        file: &str,
        visited: &mut VisitedSet,
        top_level: bool,
    ) -> Result<Resolution, ResolveError> {
        let mut walk = Walk::new(visited);
        let found = self.expand(file, &Referrer::SourceList, &mut walk)?;
        let keep_root = !top_level || walk.cycles.iter().any(|c| c.is_self_include_of(file));
        let prerequisites = found
            .into_iter()
            .filter(|path| keep_root || path != file)
            .collect();
        Ok(Resolution {
            prerequisites,
            cycles: walk.cycles,
        })
    }

    fn expand(
        &self,
        file: &str,
        referrer: &Referrer,
        walk: &mut Walk<'_>,
    ) -> Result<Vec<String>, ResolveError> {
        let bytes = self
            .root
            .read(file)
            .map_err(|err| ResolveError::from_io(file, referrer.clone(), err))?;
        let text = String::from_utf8_lossy(&bytes);
        let direct = promote_self_headers(
            file,
            self.local_targets(include::extract(&text)),
            directive_target,
        );

        walk.stack.push(file.to_owned());
        let mut found = IndexSet::new();
        for directive in direct {
            found.insert(directive.target.clone());
            if walk.visited.insert(&directive.target) {
                debug!(file, target = %directive.target, "expanding include");
                let origin = Referrer::Include {
                    file: file.to_owned(),
                    line: directive.line,
                };
                found.extend(self.expand(&directive.target, &origin, walk)?);
            } else if let Some(cycle) = walk.cycle_through(&directive.target) {
                debug!(file, %cycle, "include cycle");
                walk.cycles.push(cycle);
            }
        }
        walk.stack.pop();

        Ok(promote_self_headers(
            file,
            found.into_iter().collect(),
            String::as_str,
        ))
    }

    /// Drop `<...>` targets that are not present in the source directory.
    fn local_targets(&self, directives: Vec<IncludeDirective>) -> Vec<IncludeDirective> {
        if self.options.strict_system_includes {
            return directives;
        }
        directives
            .into_iter()
            .filter(|directive| {
                let keep =
                    directive.form == IncludeForm::Quoted || self.root.exists(&directive.target);
                if !keep {
                    debug!(target = %directive.target, "skipping system header");
                }
                keep
            })
            .collect()
    }
}

fn directive_target(directive: &IncludeDirective) -> &str {
    directive.target.as_str()
}

/// Whether `candidate` shares `file`'s stem without being `file`.
fn is_self_header(file: &str, candidate: &str) -> bool {
    candidate != file
        && Utf8Path::new(file)
            .file_stem()
            .is_some_and(|stem| Utf8Path::new(candidate).file_stem() == Some(stem))
}

/// Stable-partition `items` so self headers of `file` come first.
fn promote_self_headers<T>(file: &str, items: Vec<T>, path_of: fn(&T) -> &str) -> Vec<T> {
    let (own, rest): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| is_self_header(file, path_of(item)));
    own.into_iter().chain(rest).collect()
}
