//! Scratch source directories for resolver and CLI tests.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::fs;
use tempfile::TempDir;

/// A temporary directory holding C sources.
///
/// The directory is removed when the value is dropped.
///
/// # Examples
///
/// ```
/// use test_support::SourceTree;
///
/// # fn main() -> anyhow::Result<()> {
/// let tree = SourceTree::with_files([("main.c", "#include \"util.h\"\n"), ("util.h", "")])?;
/// assert!(tree.root().join("util.h").exists());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SourceTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SourceTree {
    /// Create an empty tree.
    ///
    /// # Errors
    ///
    /// Fails when the temporary directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temporary source tree")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path {} is not UTF-8", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Create a tree containing `files`, given as `(relative path, contents)`.
    ///
    /// # Errors
    ///
    /// Fails when the tree cannot be created or a file cannot be written.
    pub fn with_files<'a, I>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let tree = Self::new()?;
        for (name, contents) in files {
            tree.write(name, contents)?;
        }
        Ok(tree)
    }

    /// Write `contents` to `name`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails when a directory or the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))
    }

    /// Read `name` back from the tree.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }

    /// Absolute path of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Open the tree as a capability directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be opened.
    pub fn open(&self) -> Result<Dir> {
        Dir::open_ambient_dir(&self.root, ambient_authority())
            .with_context(|| format!("open {}", self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn nested_files_are_written() {
        let tree = SourceTree::with_files([("sub/deep/x.h", "int x;\n")]).expect("tree");
        assert_eq!(tree.read("sub/deep/x.h").expect("read"), "int x;\n");
    }

    #[rstest]
    fn opened_dir_sees_files() {
        let tree = SourceTree::with_files([("a.c", "")]).expect("tree");
        let dir = tree.open().expect("open");
        assert!(dir.exists("a.c"));
    }
}
