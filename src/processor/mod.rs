//! # Processor Module
//!
//! This module contains the core functionality for adding license headers to
//! collected files and writing the full license text.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading, atomic rewrites and exclusive creation
//! - [`content_transformer`] - Shebang extraction and header insertion
//! - [`file_collector`] - Directory traversal with ignore-rule pruning
//!
//! The [`Processor`] struct is the main entry point for per-file work,
//! orchestrating the submodules. [`already_has_license`], [`write_top`] and
//! [`write_full`] are the single-file operations for library callers.

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
pub use content_transformer::ContentTransformer;
pub use file_collector::{Collection, FileCollector, SkipReason, SkippedEntry};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::error::FilecenseError;
use crate::license_detection::{LicenseDetector, PrefixLicenseDetector};
use crate::report::{FileReport, LicenseFileOutcome};
use crate::templates::TemplateManager;
use crate::verbose_log;

/// What [`Processor::process_file`] did to a file it could handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderChange {
  /// The header was written
  Added,
  /// Dry run: the header would have been written
  WouldAdd,
  /// The file already starts with the header
  AlreadyLicensed,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub template_manager: TemplateManager,

  /// Compute and diff changes without writing anything
  pub dry_run: bool,

  // Optional components
  pub diff_manager: Option<DiffManager>,
  pub license_detector: Option<Box<dyn LicenseDetector>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(template_manager)
  /// }
  /// ```
  pub fn new(template_manager: TemplateManager) -> Self {
    Self {
      template_manager,
      dry_run: false,
      diff_manager: None,
      license_detector: None,
    }
  }
}

/// Processor for adding license headers to files.
///
/// The `Processor` is responsible for:
/// - Rendering the header in each file's comment syntax
/// - Skipping files that already start with the header
/// - Inserting the header after any shebang line
/// - Showing diffs instead of writing in dry run mode
/// - Collecting report data about processed files
pub struct Processor {
  template_manager: TemplateManager,
  content_transformer: ContentTransformer,
  license_detector: Box<dyn LicenseDetector>,
  diff_manager: DiffManager,
  dry_run: bool,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the shebang matcher cannot be compiled.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    Ok(Self {
      template_manager: config.template_manager,
      content_transformer: ContentTransformer::new()?,
      license_detector: config
        .license_detector
        .unwrap_or_else(|| Box::new(PrefixLicenseDetector::new())),
      diff_manager: config.diff_manager.unwrap_or_default(),
      dry_run: config.dry_run,
    })
  }

  pub const fn is_dry_run(&self) -> bool {
    self.dry_run
  }

  /// Processes every file in order and reports the outcome of each.
  ///
  /// A failure on one file is recorded in its report and does not stop the
  /// batch.
  pub fn process_files(&self, files: &[PathBuf]) -> Vec<FileReport> {
    let start_time = Instant::now();
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
      let report = match self.process_file(path) {
        Ok(HeaderChange::Added) => FileReport::added(path.clone()),
        Ok(HeaderChange::WouldAdd) => FileReport::would_add(path.clone()),
        Ok(HeaderChange::AlreadyLicensed) => FileReport::already_licensed(path.clone()),
        Err(e) => {
          debug!("Failed to process {}: {e}", path.display());
          FileReport::failed(path.clone(), e)
        }
      };
      reports.push(report);
    }

    debug!(
      "Processed {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );
    reports
  }

  /// Adds the header to a single file unless it is already there.
  ///
  /// # Returns
  ///
  /// - [`HeaderChange::AlreadyLicensed`] when the file already starts with the header
  /// - [`HeaderChange::WouldAdd`] in dry run mode, after printing the diff
  /// - [`HeaderChange::Added`] after the file was rewritten
  pub fn process_file(&self, path: &Path) -> Result<HeaderChange, FilecenseError> {
    trace!("Processing file: {}", path.display());

    let header = self.template_manager.format_for_file(path)?;
    let content = FileIO::read_text(path)?;

    let (_, body) = self.content_transformer.extract_shebang(&content);
    if self.license_detector.has_license(body, &header) {
      verbose_log!("Already licensed: {}", path.display());
      return Ok(HeaderChange::AlreadyLicensed);
    }

    let new_content = self.content_transformer.insert_header(&content, &header);

    if self.dry_run {
      self
        .diff_manager
        .display_diff(&path.display().to_string(), &content, &new_content);
      return Ok(HeaderChange::WouldAdd);
    }

    FileIO::write_atomic(path, &new_content)?;
    verbose_log!("Added license header to: {}", path.display());
    Ok(HeaderChange::Added)
  }
}

/// Returns `true` if the file, after any shebang line, starts with `rendered`.
///
/// # Errors
///
/// [`FilecenseError::Io`] or [`FilecenseError::Encoding`] if the file cannot
/// be read as text.
pub fn already_has_license(path: &Path, rendered: &str) -> Result<bool, FilecenseError> {
  let content = FileIO::read_text(path)?;
  Ok(ContentTransformer::new()?.has_header(&content, rendered))
}

/// Inserts `rendered` at the top of the file, after any shebang line.
///
/// The file is replaced atomically and keeps its permissions. No check for an
/// existing header is made; guard with [`already_has_license`].
pub fn write_top(rendered: &str, path: &Path) -> Result<(), FilecenseError> {
  let content = FileIO::read_text(path)?;
  let transformer = ContentTransformer::new()?;
  FileIO::write_atomic(path, &transformer.insert_header(&content, rendered))
}

/// Writes the full license text to `path`.
///
/// Without `overwrite` the file is created exclusively and an existing file
/// is a [`FilecenseError::FileExistsConflict`]. With `overwrite` an existing
/// file is replaced atomically.
pub fn write_full(text: &str, path: &Path, overwrite: bool) -> Result<LicenseFileOutcome, FilecenseError> {
  if overwrite && path.exists() {
    FileIO::write_atomic(path, text)?;
    return Ok(LicenseFileOutcome::Overwritten);
  }
  FileIO::write_new(path, text)?;
  Ok(LicenseFileOutcome::Created)
}
