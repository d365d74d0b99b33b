//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! opens the source directory, builds the dependency graph and hands it to
//! the selected output.

mod error;
mod output;
mod path_helpers;

pub use error::RunnerError;

use crate::cli::{Cli, Commands, GraphFormat, MakefileArgs, OnMissing, ScaffoldArgs};
use crate::graph::{DependencyGraph, GraphOptions, MissingFilePolicy};
use crate::makefile::{self, MakefileOptions};
use crate::resolver::{ResolveOptions, Resolver};
use crate::scaffold::{ScaffoldOptions, Scaffolder};
use crate::scan::{self, DEFAULT_EXTENSIONS};
use anyhow::{Context, Result};
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use tracing::{debug, info, warn};

use path_helpers::{resolve_output_path, resolve_source_dir, utf8_path};

/// Output argument meaning "write to standard output".
pub const STDOUT_MARKER: &str = "-";

impl From<OnMissing> for MissingFilePolicy {
    fn from(value: OnMissing) -> Self {
        match value {
            OnMissing::Abort => Self::Abort,
            OnMissing::Skip => Self::Skip,
        }
    }
}

/// Execute the parsed [`Cli`] commands.
///
/// # Errors
///
/// Returns an error if the source directory cannot be opened, an include
/// cannot be resolved under the abort policy, or output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let source_dir = resolve_source_dir(cli)?;
    let root = scan::open_source_dir(&source_dir)?;
    debug!(dir = %source_dir, "opened source directory");
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| Commands::Makefile(MakefileArgs::default()));
    match command {
        Commands::Makefile(args) => handle_makefile(cli, &root, &source_dir, &args),
        Commands::Graph { format } => handle_graph(cli, &root, format),
        Commands::Scaffold(args) => handle_scaffold(&root, &args),
    }
}

/// Resolve every source and write the Makefile to stdout or a file.
fn handle_makefile(
    cli: &Cli,
    root: &Dir,
    source_dir: &Utf8Path,
    args: &MakefileArgs,
) -> Result<()> {
    let graph = build_graph(cli, root)?;
    let options = MakefileOptions {
        object_prefix: args.object_prefix.clone(),
        output_prefix: args.output_prefix.clone(),
        prefix_objects: !args.no_object_prefix,
    };
    let text = makefile::generate(&graph, &options).context("rendering Makefile")?;
    let file = utf8_path(args.file.clone())?;
    if file.as_str() == STDOUT_MARKER {
        return output::write_stdout(&text);
    }
    let path = resolve_output_path(source_dir, &file)?;
    output::write_file(&path, &text)
}

/// Print the resolved graph in the requested format.
fn handle_graph(cli: &Cli, root: &Dir, format: GraphFormat) -> Result<()> {
    let graph = build_graph(cli, root)?;
    let mut text = match format {
        GraphFormat::Json => graph.to_json().context("serialising dependency graph")?,
        GraphFormat::Dot => graph.dot().to_string(),
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    output::write_stdout(&text)
}

/// Write boilerplate for each requested module, reporting each file as it
/// is handled.
fn handle_scaffold(root: &Dir, args: &ScaffoldArgs) -> Result<()> {
    let scaffolder = Scaffolder::new(ScaffoldOptions {
        guard_prefix: args.guard_prefix.clone(),
        config_header: args.config_header.clone(),
        inline_macro: args.inline_macro.clone(),
        inline_end: args.inline_end.clone(),
    })?;
    for module in &args.modules {
        let outcomes = scaffolder
            .write_module(root, module)
            .with_context(|| format!("scaffolding module `{module}`"))?;
        for outcome in outcomes {
            output::write_stdout(&format!("{outcome}\n"))?;
        }
    }
    Ok(())
}

/// Discover the sources in `root` and resolve each one.
fn build_graph(cli: &Cli, root: &Dir) -> Result<DependencyGraph> {
    let sources = if cli.extensions.is_empty() {
        scan::discover_sources(root, &DEFAULT_EXTENSIONS)
    } else {
        scan::discover_sources(root, cli.extensions.as_slice())
    }
    .context("discovering sources")?;
    if sources.is_empty() {
        warn!("no source files found");
    }
    info!(count = sources.len(), "discovered sources");

    let resolver = Resolver::new(root).with_options(ResolveOptions {
        strict_system_includes: cli.strict_system_includes,
    });
    let options = GraphOptions {
        on_missing: cli.on_missing.into(),
        warn_cycles: cli.warn_cycles,
    };
    DependencyGraph::build(&resolver, &sources, options).context("resolving includes")
}

#[cfg(test)]
mod tests;
