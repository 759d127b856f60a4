//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod add;
mod prompt;

pub use add::{AddArgs, run_add};
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "filecense",
  author,
  version,
  long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FILECENSE_GIT_HASH"), ")"),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add the EUPL header to every source file under the current directory
  filecense Jane Doe

  # MIT for 2024, no questions asked
  filecense --license mit --date 2024 --force \"ACME Corp\"

  # See what would change without touching anything
  filecense --dry-run -l gpl Jane Doe

  # Skip generated code and teach filecense a new extension
  filecense Jane Doe --skipfile '_pb2\\.py$' --regex --format .cue=//

  # List the available licenses
  filecense --listlicenses
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub add_args: AddArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;
  use crate::templates::{CommentSyntax, FormatTarget};

  fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("filecense").chain(args.iter().copied()))
  }

  #[test]
  fn test_command_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_holder_words() {
    let cli = parse(&["-l", "mit", "Jane", "Doe"]).unwrap();
    assert_eq!(cli.add_args.holder, ["Jane", "Doe"]);
    assert_eq!(cli.add_args.license.as_deref(), Some("mit"));
  }

  #[test]
  fn test_multi_value_options() {
    let cli = parse(&["Jane", "--skipdir", "a", "b", "--skip-dir", "c", "-F", ".x=#", "Makefile.*=#"]).unwrap();
    assert_eq!(cli.add_args.skip_dirs, ["a", "b", "c"]);
    assert_eq!(cli.add_args.formats.len(), 2);
    assert_eq!(cli.add_args.formats[0].target, FormatTarget::Extension("x".to_string()));
  }

  #[test]
  fn test_aliases() {
    let cli = parse(&["--list-licenses"]).unwrap();
    assert!(cli.add_args.listlicenses);

    let cli = parse(&["--license_file_name", "COPYING", "--fmt", ".x=//", "Jane"]).unwrap();
    assert_eq!(cli.add_args.license_file_name.as_deref(), Some("COPYING"));
    assert_eq!(cli.add_args.formats.len(), 1);
  }

  #[test]
  fn test_comment_syntax() {
    let cli = parse(&["-c", "/*,*/", "Jane"]).unwrap();
    assert_eq!(cli.add_args.comment, Some(CommentSyntax::block("/*", "*/")));
  }

  #[test]
  fn test_malformed_values_are_rejected() {
    assert!(parse(&["--format", "noequals", "Jane"]).is_err());
    assert!(parse(&["--format", ".x=", "Jane"]).is_err());
    assert!(parse(&["--comment", "a,b,c", "Jane"]).is_err());
    assert!(parse(&["--date", "soon", "Jane"]).is_err());
  }
}
