//! Path resolution helpers for the runner module.
//!
//! Centralises source directory and output path logic so the main runner
//! module stays focused on command dispatch.

use super::RunnerError;
use crate::cli::Cli;
use camino::{Utf8Path, Utf8PathBuf};
use std::borrow::Cow;
use std::path::PathBuf;

/// Convert a command-line path to UTF-8.
///
/// # Errors
/// Returns [`RunnerError::NonUtf8Path`] when the path is not valid UTF-8.
pub(super) fn utf8_path(path: PathBuf) -> Result<Utf8PathBuf, RunnerError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| RunnerError::NonUtf8Path { path })
}

/// Determine the source directory, defaulting to the working directory.
///
/// # Errors
/// Returns [`RunnerError::NonUtf8Path`] when `-C` is not valid UTF-8.
pub(super) fn resolve_source_dir(cli: &Cli) -> Result<Utf8PathBuf, RunnerError> {
    cli.directory
        .clone()
        .map_or_else(|| Ok(Utf8PathBuf::from(".")), utf8_path)
}

/// Resolve an output path relative to the source directory.
///
/// The `-C/--directory` option behaves like a working directory change for
/// any filesystem paths supplied on the command line, so a relative `path`
/// becomes `source_dir/path`.
///
/// # Errors
/// Returns [`RunnerError`] when `path` is not UTF-8 or has no file name.
pub(super) fn resolve_output_path<'a>(
    source_dir: &Utf8Path,
    path: &'a Utf8Path,
) -> Result<Cow<'a, Utf8Path>, RunnerError> {
    if path.file_name().is_none() {
        return Err(RunnerError::OutputMissingName {
            path: path.to_string(),
        });
    }
    if path.is_relative() && source_dir.as_str() != "." {
        Ok(Cow::Owned(source_dir.join(path)))
    } else {
        Ok(Cow::Borrowed(path))
    }
}
