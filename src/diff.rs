//! # Diff Module
//!
//! Renders the difference between a file's current content and the content
//! a run would write. Used by `--dry-run`.

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context shown around each change.
const CONTEXT_LINES: usize = 3;

/// Manages diff creation and rendering for header changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffManager;

impl DiffManager {
  pub const fn new() -> Self {
    Self
  }

  /// Builds a plain unified diff with `---`/`+++` file headers.
  pub fn render(&self, label: &str, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);
    let mut out = format!("--- {label}\n+++ {label}\n");

    for group in diff.grouped_ops(CONTEXT_LINES) {
      for op in &group {
        for change in diff.iter_changes(op) {
          let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
          };
          out.push(sign);
          out.push_str(change.value());
          if change.missing_newline() {
            out.push('\n');
          }
        }
      }
    }
    out
  }

  /// Prints the diff to stderr, coloring added and removed lines.
  pub fn display_diff(&self, label: &str, original: &str, new: &str) {
    for line in self.render(label, original, new).lines() {
      if line.starts_with("+++") || line.starts_with("---") {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.bold()));
      } else if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else {
        eprintln!("{line}");
      }
    }
  }
}
