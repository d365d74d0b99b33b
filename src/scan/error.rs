//! Error types for source discovery.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors raised while discovering sources.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// The source directory could not be opened.
    #[error("failed to open source directory `{path}`")]
    #[diagnostic(code(mkdeps::scan::open_dir))]
    OpenDir {
        /// Directory that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The source directory could not be listed.
    #[error("failed to list source directory")]
    #[diagnostic(code(mkdeps::scan::read_dir))]
    ReadDir {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
