//! Error types for Makefile rendering.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Errors raised while rendering a Makefile.
#[derive(Debug, Error, Diagnostic)]
pub enum EmitError {
    /// The preamble template failed to render.
    #[error("failed to render Makefile preamble")]
    #[diagnostic(code(mkdeps::makefile::template))]
    Template(#[from] minijinja::Error),

    /// Formatting a rule failed.
    #[error("failed to format Makefile rule")]
    #[diagnostic(code(mkdeps::makefile::format))]
    Format(#[from] fmt::Error),
}
