//! Error types for the runner module.
//!
//! Kept in a submodule so the derive-macro lint suppression stays narrow.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a command.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// A path given on the command line is not valid UTF-8.
    #[error("path `{}` is not valid UTF-8", path.display())]
    #[diagnostic(
        code(mkdeps::runner::non_utf8_path),
        help("source and output paths must be UTF-8")
    )]
    NonUtf8Path {
        /// The rejected path.
        path: PathBuf,
    },

    /// The output path names a directory rather than a file.
    #[error("output path `{path}` has no file name")]
    #[diagnostic(code(mkdeps::runner::output_missing_name))]
    OutputMissingName {
        /// The rejected path.
        path: String,
    },
}
