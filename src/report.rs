//! # Report Module
//!
//! This module captures what happened to each candidate file and to the
//! license file, and can write it out as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Whether the file has the license header (after this run, for added files)
  pub has_license: bool,
  /// Action taken on the file, if any
  pub action_taken: Option<FileAction>,
  /// Whether the file was left out by an ignore rule
  pub ignored: bool,
  /// Reason the file was ignored, if applicable
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ignored_reason: Option<String>,
  /// Error message for failed files
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub fn added(path: PathBuf) -> Self {
    Self::with_action(path, true, FileAction::Added)
  }

  pub fn would_add(path: PathBuf) -> Self {
    Self::with_action(path, false, FileAction::WouldAdd)
  }

  pub fn already_licensed(path: PathBuf) -> Self {
    Self::with_action(path, true, FileAction::NoActionNeeded)
  }

  pub fn failed(path: PathBuf, error: impl std::fmt::Display) -> Self {
    Self {
      error: Some(error.to_string()),
      ..Self::with_action(path, false, FileAction::Failed)
    }
  }

  pub fn ignored(path: PathBuf, reason: impl Into<String>) -> Self {
    Self {
      path,
      has_license: false,
      action_taken: None,
      ignored: true,
      ignored_reason: Some(reason.into()),
      error: None,
    }
  }

  fn with_action(path: PathBuf, has_license: bool, action: FileAction) -> Self {
    Self {
      path,
      has_license,
      action_taken: Some(action),
      ignored: false,
      ignored_reason: None,
      error: None,
    }
  }
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
  /// License header was added to the file
  Added,
  /// Dry run: the header would have been added
  WouldAdd,
  /// No action was needed (file already had the header)
  #[serde(rename = "none")]
  NoActionNeeded,
  /// The file could not be processed
  Failed,
}

/// What happened to the full license text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseFileOutcome {
  Created,
  Overwritten,
  WouldCreate,
  WouldOverwrite,
  /// The file exists and overwriting was not authorized
  Conflict,
  /// Writing the file failed
  Failed,
}

impl LicenseFileOutcome {
  pub const fn is_failure(self) -> bool {
    matches!(self, Self::Conflict | Self::Failed)
  }
}

/// The license file outcome along with its location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseFileReport {
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub outcome: LicenseFileOutcome,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::{Path, PathBuf};

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files processed
  pub total_files: usize,
  /// Number of files with license headers
  pub files_with_license: usize,
  /// Number of files without license headers
  pub files_without_license: usize,
  /// Number of files ignored
  pub files_ignored: usize,
  /// Number of license headers added
  pub licenses_added: usize,
  /// Number of license headers a dry run would add
  pub licenses_to_add: usize,
  /// Number of files that could not be processed
  pub files_failed: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the report was generated
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<i64>,
}

impl ProcessingSummary {
  /// Create a new ProcessingSummary initialized to zero
  pub fn new(processing_time: Duration) -> Self {
    Self {
      total_files: 0,
      files_with_license: 0,
      files_without_license: 0,
      files_ignored: 0,
      licenses_added: 0,
      licenses_to_add: 0,
      files_failed: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Some(Local::now().timestamp()),
    }
  }

  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self::new(processing_time);

    summary.total_files = files.len();

    for file in files {
      if file.ignored {
        summary.files_ignored += 1;
        continue;
      }

      if file.has_license {
        summary.files_with_license += 1;
      } else {
        summary.files_without_license += 1;
      }

      match file.action_taken {
        Some(FileAction::Added) => summary.licenses_added += 1,
        Some(FileAction::WouldAdd) => summary.licenses_to_add += 1,
        Some(FileAction::Failed) => summary.files_failed += 1,
        Some(FileAction::NoActionNeeded) | None => {}
      }
    }

    summary
  }

  pub const fn has_failures(&self) -> bool {
    self.files_failed > 0
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  #[serde(skip_serializing_if = "Option::is_none")]
  license_file: Option<&'a LicenseFileReport>,
  files: &'a [FileReport],
}

/// Writes the JSON report.
pub struct ReportGenerator<'a> {
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Render the report as pretty-printed JSON.
  pub fn render(
    files: &[FileReport],
    summary: &ProcessingSummary,
    license_file: Option<&LicenseFileReport>,
  ) -> Result<String> {
    let report = JsonReport {
      summary,
      license_file,
      files,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
  }

  /// Render the report and write it to the output path.
  pub fn generate(
    &self,
    files: &[FileReport],
    summary: &ProcessingSummary,
    license_file: Option<&LicenseFileReport>,
  ) -> Result<()> {
    let content = Self::render(files, summary, license_file)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::Value;
  use tempfile::TempDir;

  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport::added(PathBuf::from("src/main.go")),
      FileReport::already_licensed(PathBuf::from("src/lib.go")),
      FileReport::failed(PathBuf::from("data.bin"), "unknown comment syntax"),
      FileReport::ignored(PathBuf::from("README.md"), "file matches pattern '^README'"),
    ]
  }

  #[test]
  fn test_summary_counts() {
    let summary = ProcessingSummary::from_reports(&sample_reports(), Duration::from_millis(5));
    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.licenses_added, 1);
    assert_eq!(summary.files_with_license, 2);
    assert_eq!(summary.files_without_license, 1);
    assert_eq!(summary.files_ignored, 1);
    assert_eq!(summary.files_failed, 1);
    assert!(summary.has_failures());
  }

  #[test]
  fn test_dry_run_counts() {
    let reports = vec![FileReport::would_add(PathBuf::from("a.py"))];
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);
    assert_eq!(summary.licenses_to_add, 1);
    assert_eq!(summary.licenses_added, 0);
    assert!(!summary.has_failures());
  }

  #[test]
  fn test_json_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.json");
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::from_millis(5));
    let license_file = LicenseFileReport {
      path: PathBuf::from("LICENSE"),
      outcome: LicenseFileOutcome::Created,
      error: None,
    };

    ReportGenerator::new(&out)
      .generate(&reports, &summary, Some(&license_file))
      .unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["summary"]["licenses_added"], 1);
    assert_eq!(json["summary"]["files_failed"], 1);
    assert_eq!(json["license_file"]["outcome"], "created");
    assert_eq!(json["files"][0]["action_taken"], "added");
    assert_eq!(json["files"][1]["action_taken"], "none");
    assert_eq!(json["files"][2]["error"], "unknown comment syntax");
    assert_eq!(json["files"][3]["ignored"], true);
    assert!(json["files"][0].get("error").is_none());
  }
}
