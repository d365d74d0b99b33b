//! mkdeps core library.
//!
//! Scans a directory of C and C++ sources, follows their `#include`
//! directives and renders the resulting dependency graph as a Makefile, JSON
//! or Graphviz DOT. The [`cli`] and [`runner`] modules drive the `mkdeps`
//! binary; the remaining modules are usable on their own.

pub mod cli;
pub mod graph;
pub mod include;
pub mod makefile;
pub mod resolver;
pub mod runner;
pub mod scaffold;
pub mod scan;
