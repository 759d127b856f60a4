//! # Templates Module
//!
//! This module turns a plain license notice into a comment block for a given
//! file.
//!
//! The module includes:
//! - [`CommentSyntax`] describing a line or block comment
//! - [`FormatTable`] mapping extensions (and fallback name patterns) to a
//!   syntax
//! - [`SyntaxResolver`] for choosing the syntax of a file, with
//!   [`FixedSyntax`] overriding detection entirely
//! - [`render_block`] which frames the notice with comment tokens
//! - [`TemplateManager`] which ties a rendered notice to a resolver
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use filecense::templates::{FormatTable, LicenseData, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = LicenseData {
//!   year: 2024,
//!   holder: "Jane Doe".to_string(),
//! };
//! let manager = TemplateManager::new("Copyright {{year}} {{holder}}", &data, Box::new(FormatTable::builtin()?));
//!
//! let header = manager.format_for_file(Path::new("src/main.go"))?;
//! assert_eq!(header, "//\n// Copyright 2024 Jane Doe\n//\n");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;

use crate::error::FilecenseError;
use crate::verbose_log;

/// Built-in extension table. Lookup is case-sensitive, so `c` and `C` are
/// separate keys.
const BUILTIN_EXTENSIONS: &[(&str, &[&str])] = &[
  ("py", &["#"]),
  ("sh", &["#"]),
  ("bash", &["#"]),
  ("zsh", &["#"]),
  ("rb", &["#"]),
  ("pl", &["#"]),
  ("pm", &["#"]),
  ("r", &["#"]),
  ("R", &["#"]),
  ("jl", &["#"]),
  ("toml", &["#"]),
  ("tf", &["#"]),
  ("nix", &["#"]),
  ("cmake", &["#"]),
  ("ps1", &["#"]),
  ("dockerfile", &["#"]),
  ("js", &["//"]),
  ("mjs", &["//"]),
  ("cjs", &["//"]),
  ("jsx", &["//"]),
  ("ts", &["//"]),
  ("tsx", &["//"]),
  ("c", &["//"]),
  ("C", &["//"]),
  ("h", &["//"]),
  ("cc", &["//"]),
  ("cpp", &["//"]),
  ("cxx", &["//"]),
  ("hh", &["//"]),
  ("hpp", &["//"]),
  ("go", &["//"]),
  ("rs", &["//"]),
  ("java", &["//"]),
  ("kt", &["//"]),
  ("kts", &["//"]),
  ("scala", &["//"]),
  ("groovy", &["//"]),
  ("swift", &["//"]),
  ("cs", &["//"]),
  ("dart", &["//"]),
  ("proto", &["//"]),
  ("zig", &["//"]),
  ("css", &["/*", "*/"]),
  ("scss", &["/*", "*/"]),
  ("less", &["/*", "*/"]),
  ("html", &["<!--", "-->"]),
  ("htm", &["<!--", "-->"]),
  ("vue", &["<!--", "-->"]),
  ("sql", &["--"]),
  ("hs", &["--"]),
  ("lua", &["--"]),
  ("elm", &["--"]),
  ("el", &[";;"]),
  ("lisp", &[";;"]),
  ("clj", &[";;"]),
  ("erl", &["%"]),
  ("tex", &["%"]),
  ("ml", &["(*", "*)"]),
  ("mli", &["(*", "*)"]),
  ("vim", &["\""]),
];

/// Built-in fallback rules for names without a usable extension, tried in
/// order.
const BUILTIN_FALLBACKS: &[(&str, &[&str])] = &[
  ("Dockerfile", &["#"]),
  ("Containerfile", &["#"]),
  ("Makefile", &["#"]),
  ("Gemfile", &["#"]),
  ("Rakefile", &["#"]),
  ("Vagrantfile", &["#"]),
  ("Jenkinsfile", &["//"]),
];

/// Data used to fill out a license template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
  /// Copyright year substituted for `{{year}}`
  pub year: i32,
  /// License holder substituted for `{{holder}}`
  pub holder: String,
}

impl LicenseData {
  /// Substitutes `{{year}}` and `{{holder}}` in `template`.
  pub fn render(&self, template: &str) -> String {
    template
      .replace("{{year}}", &self.year.to_string())
      .replace("{{holder}}", &self.holder)
  }
}

/// Comment syntax for a file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentSyntax {
  /// Every line is prefixed with the token.
  Line(String),
  /// Every line is wrapped between the open and close tokens.
  Block { open: String, close: String },
}

impl CommentSyntax {
  pub fn line(token: impl Into<String>) -> Self {
    Self::Line(token.into())
  }

  pub fn block(open: impl Into<String>, close: impl Into<String>) -> Self {
    Self::Block {
      open: open.into(),
      close: close.into(),
    }
  }

  /// One token makes a line syntax, two make a block syntax.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::InvalidSyntax`] for zero or more than two tokens.
  pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, FilecenseError> {
    match tokens {
      [token] => Ok(Self::line(token.as_ref())),
      [open, close] => Ok(Self::block(open.as_ref(), close.as_ref())),
      _ => Err(FilecenseError::InvalidSyntax { count: tokens.len() }),
    }
  }
}

impl FromStr for CommentSyntax {
  type Err = FilecenseError;

  /// Parses `TOKEN` or `OPEN,CLOSE`.
  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let tokens: Vec<&str> = value.split(',').collect();
    if tokens.iter().any(|token| token.is_empty()) {
      return Err(FilecenseError::MalformedSyntaxArgument {
        value: value.to_string(),
        reason: "comment tokens cannot be empty".to_string(),
      });
    }
    Self::from_tokens(&tokens).map_err(|err| FilecenseError::MalformedSyntaxArgument {
      value: value.to_string(),
      reason: err.to_string(),
    })
  }
}

impl fmt::Display for CommentSyntax {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Line(token) => write!(f, "{token}"),
      Self::Block { open, close } => write!(f, "{open},{close}"),
    }
  }
}

/// What a `--format` entry applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatTarget {
  /// Extension without the leading dot.
  Extension(String),
  /// Regex matched at the start of the base name.
  Pattern(String),
}

/// A parsed `TARGET=TOKEN[,TOKEN2]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOverride {
  pub target: FormatTarget,
  pub syntax: CommentSyntax,
}

impl FormatOverride {
  /// Builds an override from a target string as written on the command line
  /// (`.ext` or a pattern) and a syntax.
  pub fn new(target: &str, syntax: CommentSyntax) -> Result<Self, FilecenseError> {
    let target = match target.strip_prefix('.') {
      Some("") => {
        return Err(FilecenseError::MalformedSyntaxArgument {
          value: target.to_string(),
          reason: "extension target is empty".to_string(),
        });
      }
      Some(ext) => FormatTarget::Extension(ext.to_string()),
      None if target.is_empty() => {
        return Err(FilecenseError::MalformedSyntaxArgument {
          value: target.to_string(),
          reason: "target is empty".to_string(),
        });
      }
      None => FormatTarget::Pattern(target.to_string()),
    };
    Ok(Self { target, syntax })
  }
}

impl FromStr for FormatOverride {
  type Err = FilecenseError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let malformed = |reason: &str| FilecenseError::MalformedSyntaxArgument {
      value: value.to_string(),
      reason: reason.to_string(),
    };

    let mut parts = value.split('=');
    let (Some(target), Some(tokens), None) = (parts.next(), parts.next(), parts.next()) else {
      return Err(malformed("expected exactly one '=' as in TARGET=TOKEN[,TOKEN2]"));
    };
    if target.is_empty() {
      return Err(malformed("target is empty"));
    }

    Self::new(target, tokens.parse()?)
  }
}

/// Extension and fallback lookup table.
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
  extensions: HashMap<String, CommentSyntax>,
  fallbacks: Vec<FallbackRule>,
}

#[derive(Debug, Clone)]
struct FallbackRule {
  pattern: String,
  regex: Regex,
  syntax: CommentSyntax,
}

impl FormatTable {
  /// An empty table.
  pub fn new() -> Self {
    Self::default()
  }

  /// The table seeded with the built-in extensions and fallbacks.
  pub fn builtin() -> Result<Self, FilecenseError> {
    let mut table = Self::new();
    for (ext, tokens) in BUILTIN_EXTENSIONS {
      table.set_extension(*ext, CommentSyntax::from_tokens(*tokens)?);
    }
    for (pattern, tokens) in BUILTIN_FALLBACKS {
      table.add_fallback(*pattern, CommentSyntax::from_tokens(*tokens)?)?;
    }
    Ok(table)
  }

  /// Maps an extension (without the dot) to a syntax, replacing any existing
  /// entry.
  pub fn set_extension(&mut self, ext: impl Into<String>, syntax: CommentSyntax) {
    self.extensions.insert(ext.into(), syntax);
  }

  /// Adds a fallback rule. A pattern already present keeps its position and
  /// takes the new syntax.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::InvalidPattern`] if the pattern does not compile.
  pub fn add_fallback(&mut self, pattern: impl Into<String>, syntax: CommentSyntax) -> Result<(), FilecenseError> {
    let pattern = pattern.into();
    let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| FilecenseError::InvalidPattern {
      pattern: pattern.clone(),
      source,
    })?;
    let rule = FallbackRule { pattern, regex, syntax };
    match self.fallbacks.iter_mut().find(|existing| existing.pattern == rule.pattern) {
      Some(existing) => *existing = rule,
      None => self.fallbacks.push(rule),
    }
    Ok(())
  }

  /// Applies a parsed `--format` entry.
  pub fn apply(&mut self, entry: &FormatOverride) -> Result<(), FilecenseError> {
    match &entry.target {
      FormatTarget::Extension(ext) => {
        self.set_extension(ext.clone(), entry.syntax.clone());
        Ok(())
      }
      FormatTarget::Pattern(pattern) => self.add_fallback(pattern.clone(), entry.syntax.clone()),
    }
  }

  /// Resolves the comment syntax for a base name.
  ///
  /// The extension table wins; fallback patterns are tried when the name has
  /// no extension or the extension is not mapped.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::UnknownCommentSyntax`] when nothing matches.
  pub fn comment_syntax_for(&self, name: &str) -> Result<CommentSyntax, FilecenseError> {
    if let Some(syntax) = extension_of(name).and_then(|ext| self.extensions.get(ext)) {
      return Ok(syntax.clone());
    }

    if let Some(rule) = self.fallbacks.iter().find(|rule| rule.regex.is_match(name)) {
      verbose_log!("Using fallback pattern '{}' for: {}", rule.pattern, name);
      return Ok(rule.syntax.clone());
    }

    Err(FilecenseError::UnknownCommentSyntax { name: name.to_string() })
  }
}

/// Text after the last dot of a base name. A name whose only dot is the
/// first or last character has no extension.
fn extension_of(name: &str) -> Option<&str> {
  match name.rfind('.') {
    Some(0) | None => None,
    Some(idx) if idx + 1 == name.len() => None,
    Some(idx) => Some(&name[idx + 1..]),
  }
}

/// Trait for choosing the comment syntax of a file.
pub trait SyntaxResolver: Send + Sync {
  /// Resolve the comment syntax for the file at `path`.
  fn resolve(&self, path: &Path) -> Result<CommentSyntax, FilecenseError>;
}

impl SyntaxResolver for FormatTable {
  fn resolve(&self, path: &Path) -> Result<CommentSyntax, FilecenseError> {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    self.comment_syntax_for(&name)
  }
}

/// Resolver that returns the same syntax for every file (`--comment`).
#[derive(Debug, Clone)]
pub struct FixedSyntax(pub CommentSyntax);

impl SyntaxResolver for FixedSyntax {
  fn resolve(&self, _path: &Path) -> Result<CommentSyntax, FilecenseError> {
    Ok(self.0.clone())
  }
}

/// Picks the resolver for a run: a fixed syntax overrides all detection.
pub fn create_resolver(fixed: Option<CommentSyntax>, table: FormatTable) -> Box<dyn SyntaxResolver> {
  match fixed {
    Some(syntax) => Box::new(FixedSyntax(syntax)),
    None => Box::new(table),
  }
}

/// Frames `text` as a comment block.
///
/// The block opens and closes with a bare comment line and ends with a
/// newline. Blank lines become bare comment lines.
pub fn render_block(text: &str, syntax: &CommentSyntax) -> String {
  let mut lines: Vec<String> = Vec::new();
  match syntax {
    CommentSyntax::Line(token) => {
      lines.push(token.clone());
      for line in text.lines() {
        if line.is_empty() {
          lines.push(token.clone());
        } else {
          lines.push(format!("{token} {line}"));
        }
      }
      lines.push(token.clone());
    }
    CommentSyntax::Block { open, close } => {
      let bare = format!("{open} {close}");
      lines.push(bare.clone());
      for line in text.lines() {
        if line.is_empty() {
          lines.push(bare.clone());
        } else {
          lines.push(format!("{open} {line} {close}"));
        }
      }
      lines.push(bare);
    }
  }
  lines.push(String::new());
  lines.join("\n")
}

/// Holds the rendered notice and formats it per file.
pub struct TemplateManager {
  /// Notice text with year and holder already substituted
  notice: String,
  /// How to pick the comment syntax of a file
  resolver: Box<dyn SyntaxResolver>,
}

impl TemplateManager {
  /// Renders `template` with `data` and keeps it alongside the resolver.
  pub fn new(template: &str, data: &LicenseData, resolver: Box<dyn SyntaxResolver>) -> Self {
    verbose_log!("Rendering header with year {} and holder '{}'", data.year, data.holder);
    Self {
      notice: data.render(template),
      resolver,
    }
  }

  /// The plain notice before commenting.
  pub fn notice(&self) -> &str {
    &self.notice
  }

  /// The commented header for the file at `path`.
  pub fn format_for_file(&self, path: &Path) -> Result<String, FilecenseError> {
    let syntax = self.resolver.resolve(path)?;
    Ok(render_block(&self.notice, &syntax))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strip_tokens(block: &str, syntax: &CommentSyntax) -> Vec<String> {
    let lines: Vec<&str> = block.lines().collect();
    let inner = &lines[1..lines.len() - 1];
    inner
      .iter()
      .map(|line| match syntax {
        CommentSyntax::Line(token) => {
          let body = line.strip_prefix(token.as_str()).unwrap();
          body.strip_prefix(' ').unwrap_or("").to_string()
        }
        CommentSyntax::Block { open, close } => {
          let body = line.strip_prefix(open.as_str()).unwrap().strip_suffix(close.as_str()).unwrap();
          body.strip_prefix(' ').unwrap_or(body).strip_suffix(' ').unwrap_or("").to_string()
        }
      })
      .collect()
  }

  #[test]
  fn test_builtin_lookups() {
    let table = FormatTable::builtin().unwrap();
    assert_eq!(table.comment_syntax_for("main.py").unwrap(), CommentSyntax::line("#"));
    assert_eq!(table.comment_syntax_for("main.go").unwrap(), CommentSyntax::line("//"));
    assert_eq!(table.comment_syntax_for("Main.C").unwrap(), CommentSyntax::line("//"));
    assert_eq!(
      table.comment_syntax_for("index.html").unwrap(),
      CommentSyntax::block("<!--", "-->")
    );
    assert_eq!(table.comment_syntax_for("style.css").unwrap(), CommentSyntax::block("/*", "*/"));
    assert_eq!(table.comment_syntax_for("Dockerfile").unwrap(), CommentSyntax::line("#"));
    assert_eq!(table.comment_syntax_for("Dockerfile.dev").unwrap(), CommentSyntax::line("#"));
  }

  #[test]
  fn test_unknown_names() {
    let table = FormatTable::builtin().unwrap();
    for name in ["incorrect", "noExt", "file.unknownext", ".bashrc", "trailing."] {
      let err = table.comment_syntax_for(name).unwrap_err();
      assert!(matches!(err, FilecenseError::UnknownCommentSyntax { .. }), "{name}");
    }
  }

  #[test]
  fn test_extension_is_case_sensitive() {
    let mut table = FormatTable::new();
    table.set_extension("c", CommentSyntax::line("//"));
    assert!(table.comment_syntax_for("a.c").is_ok());
    assert!(table.comment_syntax_for("a.C").is_err());
  }

  #[test]
  fn test_extension_takes_precedence_over_fallback() {
    let mut table = FormatTable::new();
    table.set_extension("py", CommentSyntax::line("#"));
    table.add_fallback("a", CommentSyntax::line("//")).unwrap();

    assert_eq!(table.comment_syntax_for("a.b.py").unwrap(), CommentSyntax::line("#"));
    // unmapped extension still reaches the fallback list
    assert_eq!(table.comment_syntax_for("a.b.zz").unwrap(), CommentSyntax::line("//"));
  }

  #[test]
  fn test_fallback_matches_at_start_of_name() {
    let mut table = FormatTable::new();
    table.add_fallback("file|other", CommentSyntax::line(";")).unwrap();
    assert!(table.comment_syntax_for("filename").is_ok());
    assert!(table.comment_syntax_for("otherthing").is_ok());
    assert!(table.comment_syntax_for("myfile").is_err());
  }

  #[test]
  fn test_fallback_replaces_in_place() {
    let mut table = FormatTable::new();
    table.add_fallback("Dockerfile", CommentSyntax::line("#")).unwrap();
    table.add_fallback("Dockerfile", CommentSyntax::line("//")).unwrap();
    assert_eq!(table.comment_syntax_for("Dockerfile").unwrap(), CommentSyntax::line("//"));
  }

  #[test]
  fn test_invalid_fallback_pattern() {
    let mut table = FormatTable::new();
    let err = table.add_fallback("[", CommentSyntax::line("#")).unwrap_err();
    assert!(matches!(err, FilecenseError::InvalidPattern { .. }));
  }

  #[test]
  fn test_from_tokens() {
    assert_eq!(CommentSyntax::from_tokens(&["#"]).unwrap(), CommentSyntax::line("#"));
    assert_eq!(
      CommentSyntax::from_tokens(&["/*", "*/"]).unwrap(),
      CommentSyntax::block("/*", "*/")
    );
    let empty: [&str; 0] = [];
    assert!(matches!(
      CommentSyntax::from_tokens(&empty),
      Err(FilecenseError::InvalidSyntax { count: 0 })
    ));
    assert!(matches!(
      CommentSyntax::from_tokens(&["a", "b", "c"]),
      Err(FilecenseError::InvalidSyntax { count: 3 })
    ));
  }

  #[test]
  fn test_parse_comment_argument() {
    assert_eq!("//".parse::<CommentSyntax>().unwrap(), CommentSyntax::line("//"));
    assert_eq!("<!--,-->".parse::<CommentSyntax>().unwrap(), CommentSyntax::block("<!--", "-->"));
    assert!("a,b,c".parse::<CommentSyntax>().is_err());
    assert!("".parse::<CommentSyntax>().is_err());
    assert!("/*,".parse::<CommentSyntax>().is_err());
  }

  #[test]
  fn test_parse_format_argument() {
    let parsed: FormatOverride = ".ext=//".parse().unwrap();
    assert_eq!(parsed.target, FormatTarget::Extension("ext".to_string()));
    assert_eq!(parsed.syntax, CommentSyntax::line("//"));

    let parsed: FormatOverride = "regexstr=#".parse().unwrap();
    assert_eq!(parsed.target, FormatTarget::Pattern("regexstr".to_string()));

    let parsed: FormatOverride = "morere=<!--,-->".parse().unwrap();
    assert_eq!(parsed.syntax, CommentSyntax::block("<!--", "-->"));

    for bad in ["noeq", "a=b=c", "=//", ".=//", "x=", "x=a,b,c"] {
      let err = bad.parse::<FormatOverride>().unwrap_err();
      assert!(matches!(err, FilecenseError::MalformedSyntaxArgument { .. }), "{bad}");
    }
  }

  #[test]
  fn test_apply_format_override() {
    let mut table = FormatTable::builtin().unwrap();
    table.apply(&".proto=#".parse().unwrap()).unwrap();
    table.apply(&"BUILD=#".parse().unwrap()).unwrap();
    assert_eq!(table.comment_syntax_for("api.proto").unwrap(), CommentSyntax::line("#"));
    assert_eq!(table.comment_syntax_for("BUILD.bazel").unwrap(), CommentSyntax::line("#"));
  }

  #[test]
  fn test_render_block_line() {
    let block = render_block("Copyright 2024 Jane\n\nAll rights reserved.", &CommentSyntax::line("#"));
    assert_eq!(block, "#\n# Copyright 2024 Jane\n#\n# All rights reserved.\n#\n");
  }

  #[test]
  fn test_render_block_block() {
    let block = render_block("Copyright 2024 Jane\n\nMore", &CommentSyntax::block("/*", "*/"));
    assert_eq!(block, "/* */\n/* Copyright 2024 Jane */\n/* */\n/* More */\n/* */\n");
  }

  #[test]
  fn test_render_block_strips_back_to_original() {
    let text = "first line\n\n  indented line\nlast";
    for syntax in [CommentSyntax::line("//"), CommentSyntax::block("<!--", "-->")] {
      let block = render_block(text, &syntax);
      assert!(block.ends_with('\n'));
      assert_eq!(strip_tokens(&block, &syntax), text.lines().collect::<Vec<_>>(), "{syntax}");
    }
  }

  #[test]
  fn test_fixed_syntax_overrides_detection() {
    let resolver = create_resolver(Some(CommentSyntax::line(";;")), FormatTable::builtin().unwrap());
    assert_eq!(resolver.resolve(Path::new("main.py")).unwrap(), CommentSyntax::line(";;"));
    assert_eq!(resolver.resolve(Path::new("noExt")).unwrap(), CommentSyntax::line(";;"));

    let resolver = create_resolver(None, FormatTable::builtin().unwrap());
    assert_eq!(resolver.resolve(Path::new("dir/main.py")).unwrap(), CommentSyntax::line("#"));
  }

  #[test]
  fn test_template_manager_formats_per_file() {
    let data = LicenseData {
      year: 2024,
      holder: "Jane Doe".to_string(),
    };
    let manager = TemplateManager::new(
      "Copyright {{year}} {{holder}}",
      &data,
      Box::new(FormatTable::builtin().unwrap()),
    );
    assert_eq!(manager.notice(), "Copyright 2024 Jane Doe");
    assert_eq!(
      manager.format_for_file(Path::new("a.py")).unwrap(),
      "#\n# Copyright 2024 Jane Doe\n#\n"
    );
    assert!(manager.format_for_file(Path::new("a.unknown")).is_err());
  }
}
