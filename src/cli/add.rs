//! # Add Command
//!
//! This module implements the default (and only) command: add the license
//! header to every source file under a path and write the license text at the
//! project root.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::Result;
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use super::prompt;
use crate::config::{CliOverrides, Settings, load_config};
use crate::error::FilecenseError;
use crate::info_log;
use crate::licenses::{License, LicenseRegistry};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_added_files, print_all_files_ok, print_blank_line, print_failed_files, print_hint,
  print_license_file, print_licensed_files, print_skipped, print_start_message, print_summary, print_would_add_files,
};
use crate::processor::{FileCollector, Processor, ProcessorConfig, SkipReason, write_full};
use crate::report::{FileReport, LicenseFileOutcome, LicenseFileReport, ProcessingSummary, ReportGenerator};
use crate::templates::{CommentSyntax, FormatOverride, LicenseData, TemplateManager, create_resolver};
use crate::workspace::find_root;

/// Arguments for the add command
#[derive(Args, Debug, Default)]
pub struct AddArgs {
  /// License holder; several words are joined with a space
  #[arg(value_name = "HOLDER")]
  pub holder: Vec<String>,

  /// Directory to scan
  #[arg(long, short = 'p', default_value = ".", value_name = "PATH")]
  pub path: PathBuf,

  /// Copyright year [default: current year]
  #[arg(long, short = 'd', value_name = "YEAR")]
  pub date: Option<i32>,

  /// License to apply [default: eupl]
  #[arg(long, short = 'l', value_name = "KEY")]
  pub license: Option<String>,

  /// Do not ask for confirmation; overwrite an existing license file
  #[arg(long, short = 'f')]
  pub force: bool,

  /// List the available licenses and exit
  #[arg(long, visible_alias = "list-licenses")]
  pub listlicenses: bool,

  /// Name of the full license text file [default: LICENSE]
  #[arg(long, short = 'n', alias = "license_file_name", value_name = "NAME")]
  pub license_file_name: Option<String>,

  /// Additional directory names to skip (repeatable)
  #[arg(long = "skipdir", visible_alias = "skip-dir", num_args = 1.., value_name = "DIR")]
  pub skip_dirs: Vec<String>,

  /// Additional file names to skip (repeatable)
  #[arg(long = "skipfile", visible_alias = "skip-file", num_args = 1.., value_name = "FILE")]
  pub skip_files: Vec<String>,

  /// Treat --skipdir/--skipfile values as regular expressions
  #[arg(long, short = 'r')]
  pub regex: bool,

  /// Comment syntax for an extension (.ext) or a file name pattern (repeatable)
  #[arg(
    long = "format",
    short = 'F',
    visible_alias = "fmt",
    num_args = 1..,
    value_name = "TARGET=TOKEN[,TOKEN2]"
  )]
  pub formats: Vec<FormatOverride>,

  /// Use this comment syntax for every file, overriding detection
  #[arg(long, short = 'c', value_name = "TOKEN[,TOKEN2]")]
  pub comment: Option<CommentSyntax>,

  /// Show skipped entries and full file lists (-vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Show what would change as a diff without writing anything
  #[arg(long)]
  pub dry_run: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Path to config file (default: .filecense.toml in the scan path)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Write a JSON report of per-file outcomes to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

impl AddArgs {
  /// Validate the arguments and return an error if invalid
  fn validate(&self) -> Result<(), String> {
    if self.listlicenses {
      return Ok(());
    }
    if !self.path.is_dir() {
      return Err(format!("{} is not a directory", self.path.display()));
    }
    Ok(())
  }

  fn overrides(&self) -> CliOverrides {
    let holder = (!self.holder.is_empty()).then(|| self.holder.join(" "));
    CliOverrides {
      license: self.license.clone(),
      holder,
      license_file_name: self.license_file_name.clone(),
      comment: self.comment.clone(),
      skip_dirs: self.skip_dirs.clone(),
      skip_files: self.skip_files.clone(),
      regex: self.regex,
      formats: self.formats.clone(),
    }
  }
}

fn exit_with_error(message: impl std::fmt::Display) -> ! {
  eprintln!("ERROR: {message}");
  process::exit(1);
}

/// Run the add command with the given arguments
pub fn run_add(args: AddArgs) -> Result<()> {
  if let Err(e) = args.validate() {
    exit_with_error(e);
  }

  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let registry = LicenseRegistry::builtin();
  if args.listlicenses {
    print_licenses(&registry);
    return Ok(());
  }

  let config = load_config(args.config.as_deref(), &args.path, args.no_config)?;
  let settings = Settings::resolve(config, args.overrides()).unwrap_or_else(|e| exit_with_error(e));

  // Everything below must be valid before the first file is touched.
  let license = registry.get(&settings.license).unwrap_or_else(|e| exit_with_error(e));
  let holder = match settings.holder.as_deref().map(str::trim) {
    Some(holder) if !holder.is_empty() => holder.to_string(),
    _ => exit_with_error("Missing required argument: <HOLDER>..."),
  };
  let dir_rules = settings.dir_rules().unwrap_or_else(|e| exit_with_error(e));
  let file_rules = settings.file_rules().unwrap_or_else(|e| exit_with_error(e));
  let format_table = settings.format_table().unwrap_or_else(|e| exit_with_error(e));

  let data = LicenseData {
    year: args.date.unwrap_or_else(|| chrono::Local::now().year()),
    holder,
  };
  debug!("Using license '{}' for {} ({})", license.key, data.holder, data.year);

  let template_manager = TemplateManager::new(
    license.top,
    &data,
    create_resolver(settings.comment.clone(), format_table),
  );

  let collection = FileCollector::new(dir_rules, file_rules).collect(&args.path)?;
  let scan_root = Some(args.path.as_path());
  print_skipped(&collection.skipped, scan_root);

  let files = collection.files;
  print_start_message(files.len(), license.name, args.dry_run);

  if !args.force && !args.dry_run && !files.is_empty() {
    let question = format!(
      "Add {} header to {} files under {}?",
      license.key,
      files.len(),
      args.path.display()
    );
    if !prompt::confirm(&question) {
      exit_with_error(FilecenseError::Aborted);
    }
  }

  let processor = Processor::new(ProcessorConfig {
    dry_run: args.dry_run,
    ..ProcessorConfig::new(template_manager)
  })?;

  let start_time = Instant::now();
  let mut file_reports = processor.process_files(&files);
  let elapsed = start_time.elapsed();

  file_reports.extend(
    collection
      .skipped
      .iter()
      .filter(|entry| !matches!(entry.reason, SkipReason::Directory(_)))
      .map(|entry| FileReport::ignored(entry.path.clone(), entry.reason.to_string())),
  );

  let root = find_root(&args.path)?;
  let license_report = write_license_file(
    license,
    &data,
    &root.join(&settings.license_file_name),
    args.force,
    args.dry_run,
  );

  let summary = ProcessingSummary::from_reports(&file_reports, elapsed);
  let categorized = CategorizedReports::from_reports(&file_reports);

  print_blank_line();
  if args.dry_run {
    print_would_add_files(&categorized.would_add, scan_root);
  } else {
    print_added_files(&categorized.added, scan_root);
  }
  print_licensed_files(&categorized.ok, scan_root);
  print_failed_files(&categorized.failed, scan_root);
  if categorized.added.is_empty() && categorized.would_add.is_empty() && categorized.failed.is_empty() {
    print_all_files_ok();
  }
  print_license_file(&license_report);

  print_blank_line();
  print_summary(&summary, args.dry_run);

  if args.dry_run && !categorized.would_add.is_empty() {
    print_blank_line();
    print_hint("Run without --dry-run to add the headers.");
  }

  if let Some(ref report_path) = args.report_json {
    ReportGenerator::new(report_path).generate(&file_reports, &summary, Some(&license_report))?;
    info_log!("JSON report written to {}", report_path.display());
  }

  if summary.has_failures() || license_report.outcome.is_failure() {
    process::exit(1);
  }

  Ok(())
}

/// Writes (or in a dry run, plans) the full license text at `path`.
///
/// An existing file is only replaced with `--force` or after the user
/// confirms.
fn write_license_file(
  license: &License,
  data: &LicenseData,
  path: &Path,
  force: bool,
  dry_run: bool,
) -> LicenseFileReport {
  let exists = path.exists();

  let result = if dry_run {
    Ok(if exists {
      LicenseFileOutcome::WouldOverwrite
    } else {
      LicenseFileOutcome::WouldCreate
    })
  } else {
    let overwrite = exists && (force || prompt::confirm(&format!("{} exists. Overwrite?", path.display())));
    write_full(&license.render_full(data), path, overwrite)
  };

  match result {
    Ok(outcome) => LicenseFileReport {
      path: path.to_path_buf(),
      outcome,
      error: None,
    },
    Err(e) => {
      let outcome = match e {
        FilecenseError::FileExistsConflict { .. } => LicenseFileOutcome::Conflict,
        _ => LicenseFileOutcome::Failed,
      };
      LicenseFileReport {
        path: path.to_path_buf(),
        outcome,
        error: Some(e.to_string()),
      }
    }
  }
}

fn print_licenses(registry: &LicenseRegistry) {
  for license in registry.iter() {
    println!("{:<10} {}", license.key, license.name);
  }
}
