//! # File Collector Module
//!
//! This module walks the scan root and collects the files that should get a
//! header. Ignored directories are pruned so they are never descended into;
//! ignored files and symlinks are left out.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::ignore::IgnoreSet;
use crate::verbose_log;

/// Why an entry was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  /// A directory rule matched; nothing below it was visited.
  Directory(String),
  /// A file rule matched.
  File(String),
  /// Symlinks are never followed or rewritten.
  Symlink,
}

impl std::fmt::Display for SkipReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Directory(rule) => write!(f, "directory matches {rule}"),
      Self::File(rule) => write!(f, "file matches {rule}"),
      Self::Symlink => write!(f, "symlink"),
    }
  }
}

/// An entry the walker left out.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
  pub path: PathBuf,
  pub reason: SkipReason,
}

/// Result of a walk.
#[derive(Debug, Default)]
pub struct Collection {
  /// Candidate files, in visit order
  pub files: Vec<PathBuf>,
  /// Pruned directories, excluded files and symlinks
  pub skipped: Vec<SkippedEntry>,
}

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Pre-order traversal of the scan root, sorted by file name
/// - Pruning directories matched by the directory rules
/// - Excluding files matched by the file rules
pub struct FileCollector {
  dir_rules: IgnoreSet,
  file_rules: IgnoreSet,
}

impl FileCollector {
  /// Creates a collector from the directory and file rule sets.
  pub const fn new(dir_rules: IgnoreSet, file_rules: IgnoreSet) -> Self {
    Self { dir_rules, file_rules }
  }

  /// Collects candidate files under `root`.
  ///
  /// Callers should only rely on which paths are returned, not on their
  /// order.
  pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
    Ok(self.collect(root)?.files)
  }

  /// Walks `root` and returns both the candidates and what was skipped.
  ///
  /// The root itself is never filtered. Unreadable entries below the root
  /// are reported and skipped.
  ///
  /// # Errors
  ///
  /// Returns an error if the root itself cannot be read.
  pub fn collect(&self, root: &Path) -> Result<Collection> {
    debug!("Scanning directory: {}", root.display());
    let start_time = Instant::now();

    let mut collection = Collection::default();
    let mut pruned = Vec::new();

    let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|entry| {
      if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
      }
      let name = entry.file_name().to_string_lossy();
      match self.dir_rules.matching_rule(&name) {
        Some(rule) => {
          verbose_log!("Skipping directory: {} (matches {})", entry.path().display(), rule);
          pruned.push(SkippedEntry {
            path: entry.path().to_path_buf(),
            reason: SkipReason::Directory(rule.to_string()),
          });
          false
        }
        None => true,
      }
    });

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(err) if err.depth() == 0 => {
          return Err(err).with_context(|| format!("Failed to read directory {}", root.display()));
        }
        Err(err) => {
          warn!("Skipping unreadable entry: {err}");
          continue;
        }
      };

      let file_type = entry.file_type();
      if file_type.is_dir() {
        continue;
      }
      if file_type.is_symlink() {
        verbose_log!("Skipping symlink: {}", entry.path().display());
        collection.skipped.push(SkippedEntry {
          path: entry.into_path(),
          reason: SkipReason::Symlink,
        });
        continue;
      }

      let rule = if entry.depth() > 0 {
        self.file_rules.matching_rule(&entry.file_name().to_string_lossy())
      } else {
        None
      };
      if let Some(rule) = rule {
        verbose_log!("Skipping file: {} (matches {})", entry.path().display(), rule);
        let reason = SkipReason::File(rule.to_string());
        collection.skipped.push(SkippedEntry {
          path: entry.into_path(),
          reason,
        });
        continue;
      }

      collection.files.push(entry.into_path());
    }

    collection.skipped.extend(pruned);

    debug!(
      "Found {} files ({} skipped) in {}ms",
      collection.files.len(),
      collection.skipped.len(),
      start_time.elapsed().as_millis()
    );

    Ok(collection)
  }
}
