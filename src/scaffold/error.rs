//! Error types for module scaffolding.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors raised while scaffolding a module.
#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    /// The module name has no file name component.
    #[error("invalid module name `{module}`")]
    #[diagnostic(
        code(mkdeps::scaffold::invalid_module),
        help("pass a module path without extension, such as `list` or `sys/thread`")
    )]
    InvalidModule {
        /// Rejected module name.
        module: String,
    },

    /// A template failed to render.
    #[error("failed to render boilerplate for `{path}`")]
    #[diagnostic(code(mkdeps::scaffold::template))]
    Template {
        /// File being rendered.
        path: String,
        /// Underlying template failure.
        #[source]
        source: minijinja::Error,
    },

    /// A file could not be created or written.
    #[error("failed to write `{path}`")]
    #[diagnostic(code(mkdeps::scaffold::write))]
    Write {
        /// File being written.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
