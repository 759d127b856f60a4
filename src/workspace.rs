//! # Workspace Module
//!
//! This module locates the project root, where the full license text is
//! written. A project root is the first directory, searching top-down from
//! the scan path, that contains a `.git` subdirectory. Nothing else about the
//! repository is inspected.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

const VCS_DIR: &str = ".git";

/// Workspace root selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workspace {
  /// A directory holding a `.git` subdirectory was found.
  Project { root: PathBuf },
  /// No project marker was found; the scan path itself is the root.
  Directory { root: PathBuf },
}

impl Workspace {
  pub fn root(&self) -> &Path {
    match self {
      Self::Project { root } | Self::Directory { root } => root.as_path(),
    }
  }

  pub fn into_root(self) -> PathBuf {
    match self {
      Self::Project { root } | Self::Directory { root } => root,
    }
  }

  pub const fn is_project(&self) -> bool {
    matches!(self, Self::Project { .. })
  }
}

/// Resolve the workspace for a scan path.
///
/// Directories are visited in pre-order, sorted by name, and `.git`
/// directories are never descended into. The first directory with a `.git`
/// subdirectory wins.
pub fn resolve_workspace(path: &Path) -> Result<Workspace> {
  let absolute = std::path::absolute(path).with_context(|| format!("Failed to resolve path {}", path.display()))?;

  let walker = WalkDir::new(&absolute)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| entry.file_type().is_dir() && (entry.depth() == 0 || entry.file_name() != VCS_DIR));

  for entry in walker.filter_map(Result::ok) {
    if entry.path().join(VCS_DIR).is_dir() {
      debug!("Found project root: {}", entry.path().display());
      return Ok(Workspace::Project {
        root: entry.into_path(),
      });
    }
  }

  debug!("No project root below {}, using it as is", absolute.display());
  Ok(Workspace::Directory { root: absolute })
}

/// The directory that receives the license file, as an absolute path.
pub fn find_root(path: &Path) -> Result<PathBuf> {
  Ok(resolve_workspace(path)?.into_root())
}
