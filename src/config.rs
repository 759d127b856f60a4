//! # Configuration Module
//!
//! This module provides configuration support for filecense. A project can
//! keep its license choice, holder, extra skip rules and comment formats in a
//! `.filecense.toml` file instead of repeating them on every run.
//!
//! Configuration can be specified in a `.filecense.toml` file in the scan
//! path, via the `FILECENSE_CONFIG` environment variable or with `--config`.
//! Command-line values always win over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::FilecenseError;
use crate::ignore::{IgnoreSet, MatchKind};
use crate::templates::{CommentSyntax, FormatOverride, FormatTable};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".filecense.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "FILECENSE_CONFIG";

/// License used when neither the command line nor the config names one.
pub const DEFAULT_LICENSE: &str = "eupl";

/// File name of the full license text unless configured otherwise.
pub const DEFAULT_LICENSE_FILE_NAME: &str = "LICENSE";

/// Extra skip rules from the `[skip]` table.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SkipConfig {
  /// Directory names skipped on exact match
  pub dirs: Vec<String>,
  /// File names skipped on exact match
  pub files: Vec<String>,
  /// Regexes searched in directory names
  pub dir_patterns: Vec<String>,
  /// Regexes searched in file names
  pub file_patterns: Vec<String>,
}

/// One `[[format]]` entry, the config form of `--format TARGET=TOKENS`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
  /// `.ext` for an extension, anything else is a file name pattern
  pub target: String,
  /// One token for line comments, two for block comments
  pub syntax: Vec<String>,
}

/// Main configuration struct for filecense.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  pub license: Option<String>,
  pub holder: Option<String>,
  pub license_file_name: Option<String>,
  /// Same syntax as `--comment`
  pub comment: Option<String>,
  pub skip: SkipConfig,
  #[serde(rename = "format")]
  pub formats: Vec<FormatConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A `[[format]]` entry is invalid.
  #[error("Invalid format entry for '{target}': {message}")]
  InvalidFormat { target: String, message: String },

  /// The `comment` value is invalid.
  #[error("Invalid comment syntax '{value}': {message}")]
  InvalidComment { value: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!(
      "Loaded {} skip rules and {} format entries",
      config.skip.dirs.len() + config.skip.files.len() + config.skip.dir_patterns.len() + config.skip.file_patterns.len(),
      config.formats.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Every format entry has a usable target and one or two tokens
  /// - The `comment` value parses like `--comment`
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.format_overrides()?;
    self.comment_syntax()?;
    Ok(())
  }

  /// The `[[format]]` entries as table overrides, in file order.
  pub fn format_overrides(&self) -> Result<Vec<FormatOverride>, ConfigError> {
    self
      .formats
      .iter()
      .map(|entry| {
        let invalid = |e: FilecenseError| ConfigError::InvalidFormat {
          target: entry.target.clone(),
          message: e.to_string(),
        };
        let syntax = CommentSyntax::from_tokens(&entry.syntax).map_err(invalid)?;
        FormatOverride::new(&entry.target, syntax).map_err(invalid)
      })
      .collect()
  }

  /// The `comment` value, parsed.
  pub fn comment_syntax(&self) -> Result<Option<CommentSyntax>, ConfigError> {
    self
      .comment
      .as_deref()
      .map(|value| {
        value.parse::<CommentSyntax>().map_err(|e| ConfigError::InvalidComment {
          value: value.to_string(),
          message: e.to_string(),
        })
      })
      .transpose()
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `FILECENSE_CONFIG` environment variable
/// 3. `.filecense.toml` in the scan path
///
/// An explicit path is returned even if it does not exist, so that loading it
/// reports the problem instead of silently running without it.
pub fn discover_config_path(explicit_path: Option<&Path>, scan_path: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = scan_path.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Returns
///
/// The loaded configuration, or `None` if discovery is disabled or no config
/// file is found.
pub fn load_config(explicit_path: Option<&Path>, scan_path: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, scan_path) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

/// Values given on the command line. `None` and empty lists defer to the
/// config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub license: Option<String>,
  pub holder: Option<String>,
  pub license_file_name: Option<String>,
  pub comment: Option<CommentSyntax>,
  pub skip_dirs: Vec<String>,
  pub skip_files: Vec<String>,
  /// Skip values are regexes instead of exact names
  pub regex: bool,
  pub formats: Vec<FormatOverride>,
}

/// Effective settings for a run after merging config and command line.
#[derive(Debug, Clone)]
pub struct Settings {
  pub license: String,
  pub holder: Option<String>,
  pub license_file_name: String,
  pub comment: Option<CommentSyntax>,
  pub skip_dirs: Vec<(String, MatchKind)>,
  pub skip_files: Vec<(String, MatchKind)>,
  pub formats: Vec<FormatOverride>,
}

impl Settings {
  /// Merge the config file (if any) under the command-line values.
  ///
  /// Scalars from the command line replace those from the config. Skip rules
  /// and format entries accumulate, config entries first.
  pub fn resolve(config: Option<Config>, cli: CliOverrides) -> Result<Self, ConfigError> {
    let config = config.unwrap_or_default();

    let comment = match cli.comment {
      Some(syntax) => Some(syntax),
      None => config.comment_syntax()?,
    };

    let mut formats = config.format_overrides()?;
    formats.extend(cli.formats);

    let cli_kind = if cli.regex { MatchKind::Pattern } else { MatchKind::Exact };

    let SkipConfig {
      dirs,
      files,
      dir_patterns,
      file_patterns,
    } = config.skip;

    let skip_dirs = tag(dirs, MatchKind::Exact)
      .chain(tag(dir_patterns, MatchKind::Pattern))
      .chain(tag(cli.skip_dirs, cli_kind))
      .collect();
    let skip_files = tag(files, MatchKind::Exact)
      .chain(tag(file_patterns, MatchKind::Pattern))
      .chain(tag(cli.skip_files, cli_kind))
      .collect();

    Ok(Self {
      license: cli
        .license
        .or(config.license)
        .unwrap_or_else(|| DEFAULT_LICENSE.to_string()),
      holder: cli.holder.or(config.holder),
      license_file_name: cli
        .license_file_name
        .or(config.license_file_name)
        .unwrap_or_else(|| DEFAULT_LICENSE_FILE_NAME.to_string()),
      comment,
      skip_dirs,
      skip_files,
      formats,
    })
  }

  /// Built-in directory rules plus the configured ones.
  pub fn dir_rules(&self) -> Result<IgnoreSet, FilecenseError> {
    let mut rules = IgnoreSet::default_dirs()?;
    rules.extend(self.skip_dirs.iter().cloned())?;
    Ok(rules)
  }

  /// Built-in file rules plus the configured ones.
  pub fn file_rules(&self) -> Result<IgnoreSet, FilecenseError> {
    let mut rules = IgnoreSet::default_files()?;
    rules.extend(self.skip_files.iter().cloned())?;
    Ok(rules)
  }

  /// Built-in format table with every override applied in order.
  pub fn format_table(&self) -> Result<FormatTable, FilecenseError> {
    let mut table = FormatTable::builtin()?;
    for entry in &self.formats {
      table.apply(entry)?;
    }
    Ok(table)
  }
}

fn tag(values: Vec<String>, kind: MatchKind) -> impl Iterator<Item = (String, MatchKind)> {
  values.into_iter().map(move |value| (value, kind))
}
