//! # Output Module
//!
//! This module centralizes all user-facing output for filecense.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show what changed without requiring flags
//! - **Scannable**: Use formatting to make output easy to parse visually
//! - **Progressive**: More detail with `-v`, only errors with `-q`
//! - **Scriptable**: Progress and results on stdout, failures and diffs on stderr

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::SkippedEntry;
use crate::report::{FileAction, FileReport, LicenseFileOutcome, LicenseFileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success/has license
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure/conflict
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Ignored/skipped
  pub const IGNORED: &str = "-";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print "Adding <license> header to N files..." before processing.
pub fn print_start_message(file_count: usize, license_name: &str, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Adding" };
  println!(
    "{} {} header to {} {}...",
    verb,
    license_name,
    file_count,
    plural(file_count)
  );
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Prints `header` and then the files, sorted, truncated unless verbose.
fn print_file_list(header: &str, files: &[&FileReport], workspace_root: Option<&Path>) {
  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  println!("{header}");

  let count = sorted_files.len();
  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, workspace_root));
  }

  if !show_all && count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print the list of files that had licenses added.
pub fn print_added_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let header = format!(
    "{} Added license to {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, workspace_root);
}

/// Print the list of files a dry run would change.
pub fn print_would_add_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let header = format!(
    "{} {} {} would get a license header:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.yellow()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, workspace_root);
}

/// Print files that already had the header. Only shown in verbose mode.
pub fn print_licensed_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if !is_verbose() || files.is_empty() {
    return;
  }

  let header = format!(
    "{} {} {} already licensed:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.cyan()),
    files.len(),
    plural(files.len())
  );
  print_file_list(&header, files, workspace_root);
}

/// Print every failed file with its error to stderr, even in quiet mode.
pub fn print_failed_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  eprintln!(
    "{} Failed to process {} {}:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    files.len(),
    plural(files.len())
  );
  for file in files {
    let error = file.error.as_deref().unwrap_or("unknown error");
    eprintln!("  {}: {}", make_relative_path(&file.path, workspace_root), error);
  }
}

/// Print pruned directories and excluded files. Only shown in verbose mode.
pub fn print_skipped(entries: &[SkippedEntry], workspace_root: Option<&Path>) {
  if !is_verbose() || entries.is_empty() {
    return;
  }

  println!(
    "{} Skipped {} {}:",
    symbols::IGNORED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    entries.len(),
    if entries.len() == 1 { "entry" } else { "entries" }
  );
  for entry in entries {
    let display_path = make_relative_path(&entry.path, workspace_root);
    println!(
      "  {} ({})",
      display_path.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      entry.reason
    );
  }
}

/// Print what happened to the license file. Conflicts and failures go to
/// stderr.
pub fn print_license_file(report: &LicenseFileReport) {
  let path = report.path.display();
  let message = match report.outcome {
    LicenseFileOutcome::Created => format!("Wrote license text to {path}"),
    LicenseFileOutcome::Overwritten => format!("Overwrote license text in {path}"),
    LicenseFileOutcome::WouldCreate => format!("Would write license text to {path}"),
    LicenseFileOutcome::WouldOverwrite => format!("Would overwrite license text in {path}"),
    LicenseFileOutcome::Conflict | LicenseFileOutcome::Failed => {
      eprintln!(
        "{} {}: {}",
        symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
        path,
        report.error.as_deref().unwrap_or("license file not written")
      );
      return;
    }
  };

  if !is_quiet() {
    println!(
      "{} {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      message
    );
  }
}

/// Print the success message when no file needed a header.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files already have the license header.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X added, Y already licensed, Z failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let (changed, verb) = if dry_run {
    (summary.licenses_to_add, "to add")
  } else {
    (summary.licenses_added, "added")
  };
  let ok_count = summary.files_with_license.saturating_sub(summary.licenses_added);

  let changed_str = changed.if_supports_color(Stream::Stdout, |s| s.green());
  let ok_str = ok_count.if_supports_color(Stream::Stdout, |s| s.cyan());
  let failed_str = if summary.files_failed > 0 {
    summary
      .files_failed
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .files_failed
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };

  let mut summary_line = format!("Summary: {changed_str} {verb}, {ok_str} already licensed, {failed_str} failed");

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{summary_line}");
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Categorize file reports into different groups for output.
pub struct CategorizedReports<'a> {
  /// Files that had licenses added
  pub added: Vec<&'a FileReport>,
  /// Files a dry run would change
  pub would_add: Vec<&'a FileReport>,
  /// Files that already had the header
  pub ok: Vec<&'a FileReport>,
  /// Files that could not be processed
  pub failed: Vec<&'a FileReport>,
  /// Files that were ignored
  pub ignored: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self {
      added: Vec::new(),
      would_add: Vec::new(),
      ok: Vec::new(),
      failed: Vec::new(),
      ignored: Vec::new(),
    };

    for report in reports {
      if report.ignored {
        categorized.ignored.push(report);
        continue;
      }

      match report.action_taken {
        Some(FileAction::Added) => categorized.added.push(report),
        Some(FileAction::WouldAdd) => categorized.would_add.push(report),
        Some(FileAction::NoActionNeeded) => categorized.ok.push(report),
        Some(FileAction::Failed) => categorized.failed.push(report),
        None => categorized.ignored.push(report),
      }
    }

    categorized
  }
}

/// Make a path relative to the scan root for display.
pub fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  workspace_root
    .and_then(|root| path.strip_prefix(root).ok())
    .filter(|relative| !relative.as_os_str().is_empty())
    .unwrap_or(path)
    .to_string_lossy()
    .to_string()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_categorize_reports_mixed() {
    let reports = vec![
      FileReport::already_licensed(PathBuf::from("src/main.rs")),
      FileReport::added(PathBuf::from("src/added.rs")),
      FileReport::would_add(PathBuf::from("src/planned.rs")),
      FileReport::failed(PathBuf::from("src/broken.rs"), "not valid UTF-8"),
      FileReport::ignored(PathBuf::from("README.md"), "pattern"),
    ];

    let categorized = CategorizedReports::from_reports(&reports);

    assert_eq!(categorized.ok.len(), 1);
    assert_eq!(categorized.added.len(), 1);
    assert_eq!(categorized.would_add.len(), 1);
    assert_eq!(categorized.failed.len(), 1);
    assert_eq!(categorized.ignored.len(), 1);
    assert_eq!(categorized.failed[0].path, PathBuf::from("src/broken.rs"));
  }

  #[test]
  fn test_categorize_reports_empty() {
    let categorized = CategorizedReports::from_reports(&[]);
    assert!(categorized.added.is_empty());
    assert!(categorized.failed.is_empty());
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/main.rs");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(&root)), "src/main.rs");
  }

  #[test]
  fn test_make_relative_path_outside_root() {
    let path = PathBuf::from("/elsewhere/main.rs");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, Some(&root)), "/elsewhere/main.rs");
  }

  #[test]
  fn test_make_relative_path_without_root() {
    let path = PathBuf::from("/workspace/project/src/main.rs");
    assert_eq!(make_relative_path(&path, None), "/workspace/project/src/main.rs");
  }
}
