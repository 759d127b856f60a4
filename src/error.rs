//! # Error Module
//!
//! Typed errors for the cases callers (and tests) need to tell apart.
//! Everything else travels as `anyhow::Error` with context attached.

use std::path::PathBuf;

/// Errors raised by the matcher, formatter, header writer and CLI.
#[derive(Debug, thiserror::Error)]
pub enum FilecenseError {
  /// The requested license key is not in the registry.
  #[error("license '{key}' is not supported (available: {available})")]
  UnsupportedLicense { key: String, available: String },

  /// No extension entry or fallback pattern matched the file name.
  #[error("could not detect comment syntax for '{name}', use --format or --comment")]
  UnknownCommentSyntax { name: String },

  /// A `--format` / `--comment` value could not be parsed.
  #[error("malformed syntax argument '{value}': {reason}")]
  MalformedSyntaxArgument { value: String, reason: String },

  /// A comment syntax was built from the wrong number of tokens.
  #[error("comment syntax takes one or two tokens, got {count}")]
  InvalidSyntax { count: usize },

  /// A skip rule or fallback pattern is not a valid regex.
  #[error("invalid pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  /// The license file already exists and overwriting was not authorized.
  #[error("license file {} already exists", path.display())]
  FileExistsConflict { path: PathBuf },

  /// Reading or writing a file failed.
  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The file is not valid UTF-8 text.
  #[error("{} is not valid UTF-8", path.display())]
  Encoding { path: PathBuf },

  /// The user declined the confirmation prompt.
  #[error("aborted by user")]
  Aborted,
}

impl FilecenseError {
  /// Wraps an I/O error with the path it happened on.
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
