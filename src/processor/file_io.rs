//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Rewrites go through a temporary file in the same directory that is renamed
//! over the original, so a crash never leaves a half-written source file.

use std::fs;
use std::io::{self, ErrorKind, Write as _};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::FilecenseError;

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads a whole file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::Io`] if the file cannot be read and
  /// [`FilecenseError::Encoding`] if it is not valid UTF-8.
  pub fn read_text(path: &Path) -> Result<String, FilecenseError> {
    let bytes = fs::read(path).map_err(|e| FilecenseError::io(path, e))?;
    String::from_utf8(bytes).ok().ok_or_else(|| FilecenseError::Encoding {
      path: path.to_path_buf(),
    })
  }

  /// Replaces the content of an existing file atomically.
  ///
  /// The new content is written to a temporary file next to `path`, given the
  /// original permissions and renamed over it. The temporary file is removed
  /// if any step fails.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::Io`] if `path` is missing or read-only, or if any
  /// write fails. A read-only `path` is refused before any temporary file is
  /// created.
  pub fn write_atomic(path: &Path, content: &str) -> Result<(), FilecenseError> {
    let parent = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    let permissions = fs::metadata(path)
      .map_err(|e| FilecenseError::io(path, e))?
      .permissions();
    if permissions.readonly() {
      return Err(FilecenseError::io(
        path,
        io::Error::new(ErrorKind::PermissionDenied, "file is read-only"),
      ));
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FilecenseError::io(path, e))?;
    temp
      .write_all(content.as_bytes())
      .and_then(|()| temp.flush())
      .map_err(|e| FilecenseError::io(path, e))?;
    temp
      .as_file()
      .set_permissions(permissions)
      .map_err(|e| FilecenseError::io(path, e))?;

    temp.persist(path).map_err(|e| FilecenseError::io(path, e.error))?;
    Ok(())
  }

  /// Creates a new file, failing if it already exists.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::FileExistsConflict`] if `path` exists.
  pub fn write_new(path: &Path, content: &str) -> Result<(), FilecenseError> {
    let mut file = fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(path)
      .map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => FilecenseError::FileExistsConflict {
          path: path.to_path_buf(),
        },
        _ => FilecenseError::io(path, e),
      })?;
    file
      .write_all(content.as_bytes())
      .map_err(|e| FilecenseError::io(path, e))
  }
}
