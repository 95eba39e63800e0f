//! Depth-first directory traversal
//!
//! Yields one [`DirectoryNode`] per directory, parents before children, with
//! subdirectories and files sorted by name so generated output is identical on
//! every platform. Symbolic links are never descended into: a link to a
//! directory is skipped, any other link is reported as a file. Files passed to
//! [`DirectoryWalker::excluding`] are left out, so generated output placed
//! under the root is never embedded into itself.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;

/// One visited directory and its immediate children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Path relative to the walk root (empty for the root itself)
    pub relative: PathBuf,
    /// Path usable for file system access
    pub path: PathBuf,
    /// Immediate subdirectory names, sorted
    pub subdirs: Vec<OsString>,
    /// Immediate non-directory entry names, sorted
    pub files: Vec<OsString>,
}

impl DirectoryNode {
    /// Relative path with `/` separators, `.` for the root
    pub fn display_relative(&self) -> String {
        if self.is_root() {
            ".".to_string()
        } else {
            self.relative.to_string_lossy().replace('\\', "/")
        }
    }

    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }
}

/// Lazy pre-order walk over every directory below a root
#[derive(Debug)]
pub struct DirectoryWalker {
    root: PathBuf,
    pending: Vec<PathBuf>,
    excluded: Vec<PathBuf>,
}

impl DirectoryWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pending: vec![PathBuf::new()],
            excluded: Vec::new(),
        }
    }

    /// Skip these files wherever they appear. Paths must be spelled the way
    /// the walk reaches them, i.e. under the same root path.
    #[must_use]
    pub fn excluding(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.excluded.extend(paths);
        self
    }

    fn absolute(&self, relative: &Path) -> PathBuf {
        if relative.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    fn list(&self, relative: PathBuf) -> Result<DirectoryNode> {
        let path = self.absolute(&relative);
        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        let entries = WalkDir::new(&path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_os_string();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                subdirs.push(name);
            } else if file_type.is_symlink() && points_to_dir(entry.path()) {
                warn!(path = %entry.path().display(), "skipping symlink to directory");
            } else if self.excluded.iter().any(|p| p == entry.path()) {
                debug!(path = %entry.path().display(), "skipping generated output");
            } else {
                files.push(name);
            }
        }

        debug!(
            dir = %path.display(),
            subdirs = subdirs.len(),
            files = files.len(),
            "listed directory"
        );

        Ok(DirectoryNode {
            relative,
            path,
            subdirs,
            files,
        })
    }
}

fn points_to_dir(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_dir())
}

impl Iterator for DirectoryWalker {
    type Item = Result<DirectoryNode>;

    fn next(&mut self) -> Option<Self::Item> {
        let relative = self.pending.pop()?;
        match self.list(relative) {
            Ok(node) => {
                // Reverse so the smallest name is popped first.
                for sub in node.subdirs.iter().rev() {
                    self.pending.push(node.relative.join(sub));
                }
                Some(Ok(node))
            }
            Err(e) => {
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}
