//! Error types for include resolution.
//!
//! Kept in their own submodule so the lint suppression required by the
//! `thiserror`/`miette` derive expansion stays narrowly scoped.

// The unused_assignments lint fires in some Rust versions for these derives
// but not others, so `#[expect]` cannot be used here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use std::fmt::{self, Display, Formatter};
use std::io;
use thiserror::Error;

/// Where a path passed to the resolver came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referrer {
    /// The path is a top-level source file.
    SourceList,
    /// The path was named by an include directive.
    Include {
        /// File containing the directive.
        file: String,
        /// One-based line number of the directive.
        line: usize,
    },
}

impl Referrer {
    /// File that named the path, if it came from a directive.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::SourceList => None,
            Self::Include { file, .. } => Some(file.as_str()),
        }
    }
}

impl Display for Referrer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceList => f.write_str("the source list"),
            Self::Include { file, line } => write!(f, "`{file}` (line {line})"),
        }
    }
}

/// Errors raised while resolving the prerequisites of a file.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// The file does not exist in the source directory.
    #[error("`{path}` referenced by {referenced_by} does not exist")]
    #[diagnostic(
        code(mkdeps::resolve::missing_file),
        help("include targets are looked up relative to the source directory")
    )]
    MissingFile {
        /// Path that could not be found.
        path: String,
        /// Origin of the path.
        referenced_by: Referrer,
    },

    /// The file exists but could not be read.
    #[error("`{path}` referenced by {referenced_by} could not be read")]
    #[diagnostic(code(mkdeps::resolve::unreadable_file))]
    UnreadableFile {
        /// Path that failed to read.
        path: String,
        /// Origin of the path.
        referenced_by: Referrer,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// Classify an I/O failure for `path`.
    pub(crate) fn from_io(path: &str, referenced_by: Referrer, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::MissingFile {
                path: path.to_owned(),
                referenced_by,
            }
        } else {
            Self::UnreadableFile {
                path: path.to_owned(),
                referenced_by,
                source,
            }
        }
    }

    /// Path the error is about.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingFile { path, .. } | Self::UnreadableFile { path, .. } => path,
        }
    }

    /// Origin of the path the error is about.
    #[must_use]
    pub const fn referenced_by(&self) -> &Referrer {
        match self {
            Self::MissingFile { referenced_by, .. } | Self::UnreadableFile { referenced_by, .. } => {
                referenced_by
            }
        }
    }
}
