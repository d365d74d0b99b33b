//! Output sinks for generated text.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::{self, Write};
use tempfile::NamedTempFile;
use tracing::info;

/// Write `content` to standard output.
///
/// # Errors
/// Returns an error if standard output cannot be written.
pub(super) fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to standard output")
}

/// Atomically replace `path` with `content`.
///
/// The text is written to a temporary file in the destination directory and
/// renamed over `path`, so readers never observe a partial file.
///
/// # Errors
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written or renamed.
pub(super) fn write_file(path: &Utf8Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create parent directory {parent}"))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {parent}"))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {path}"))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to replace {path}"))?;
    info!(path = %path, "wrote Makefile");
    Ok(())
}
