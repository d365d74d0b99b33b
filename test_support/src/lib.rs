//! Test utilities for the `mkdeps` test suites.
//!
//! Provides [`SourceTree`], a scratch directory populated with C sources, and
//! helpers for asserting on error chains.

pub mod error;
pub mod source_tree;

pub use error::display_error_chain;
pub use source_tree::SourceTree;
