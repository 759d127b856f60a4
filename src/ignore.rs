//! # Ignore Module
//!
//! This module decides which directories and files the walker skips.
//!
//! An [`IgnoreSet`] is an ordered list of [`IgnoreRule`]s keyed by their
//! pattern string. A rule either compares a base name for equality or runs an
//! unanchored regex search over it. A name is ignored as soon as one rule
//! matches; order only decides which rule gets reported as the reason.
//!
//! Two sets are built per run (one for directories, one for files) from the
//! built-in defaults plus user additions, and are read-only afterwards.
//!
//! ## Example
//!
//! ```rust
//! use filecense::ignore::{IgnoreSet, MatchKind};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut dirs = IgnoreSet::default_dirs()?;
//! dirs.insert("third_party", MatchKind::Exact)?;
//!
//! assert!(dirs.is_ignored("vendor"));
//! assert!(dirs.is_ignored(".cache"));
//! assert!(dirs.is_ignored("third_party"));
//! assert!(!dirs.is_ignored("src"));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use regex::Regex;

use crate::error::FilecenseError;

/// How a rule's pattern string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
  /// Plain string equality against the base name.
  Exact,
  /// Regex searched anywhere in the base name.
  Pattern,
}

/// Directory rules every run starts with.
pub const DEFAULT_DIR_RULES: &[(&str, MatchKind)] = &[
  (".git", MatchKind::Exact),
  ("testdata", MatchKind::Exact),
  ("node_modules", MatchKind::Exact),
  ("vendor", MatchKind::Exact),
  ("bower_components", MatchKind::Exact),
  ("build", MatchKind::Exact),
  ("dist", MatchKind::Exact),
  ("target", MatchKind::Exact),
  ("__pycache__", MatchKind::Exact),
  (r"^\..+", MatchKind::Pattern),
];

/// File rules every run starts with.
pub const DEFAULT_FILE_RULES: &[(&str, MatchKind)] = &[
  (r"^README\.*\w{0,5}$", MatchKind::Pattern),
  (r"\.txt$", MatchKind::Pattern),
  (r"\.xml$", MatchKind::Pattern),
  (r"\.json$", MatchKind::Pattern),
  (r"\.jpg$", MatchKind::Pattern),
  (r"\.png$", MatchKind::Pattern),
  (r"\.svg$", MatchKind::Pattern),
  (r"\.md$", MatchKind::Pattern),
  (r"\.ya?ml$", MatchKind::Pattern),
  (r"^\..+", MatchKind::Pattern),
  (r"^\w+$", MatchKind::Pattern),
  ("package-lock.json", MatchKind::Exact),
  ("yarn.lock", MatchKind::Exact),
  ("favicon.ico", MatchKind::Exact),
];

/// Compiled form of a rule.
#[derive(Debug, Clone)]
enum Matcher {
  Exact,
  Pattern(Regex),
}

/// A single ignore rule.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
  pattern: String,
  matcher: Matcher,
}

impl IgnoreRule {
  /// Builds a rule, compiling the regex for [`MatchKind::Pattern`].
  ///
  /// # Errors
  ///
  /// Returns [`FilecenseError::InvalidPattern`] if the regex does not compile.
  pub fn new(pattern: impl Into<String>, kind: MatchKind) -> Result<Self, FilecenseError> {
    let pattern = pattern.into();
    let matcher = match kind {
      MatchKind::Exact => Matcher::Exact,
      MatchKind::Pattern => Matcher::Pattern(compile(&pattern)?),
    };
    Ok(Self { pattern, matcher })
  }

  /// The pattern string this rule was built from.
  pub fn pattern(&self) -> &str {
    &self.pattern
  }

  pub const fn kind(&self) -> MatchKind {
    match self.matcher {
      Matcher::Exact => MatchKind::Exact,
      Matcher::Pattern(_) => MatchKind::Pattern,
    }
  }

  /// Checks the rule against a base name.
  pub fn is_match(&self, name: &str) -> bool {
    match &self.matcher {
      Matcher::Exact => self.pattern == name,
      Matcher::Pattern(regex) => regex.is_match(name),
    }
  }
}

impl fmt::Display for IgnoreRule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.matcher {
      Matcher::Exact => write!(f, "exact '{}'", self.pattern),
      Matcher::Pattern(_) => write!(f, "pattern '{}'", self.pattern),
    }
  }
}

/// Ordered collection of ignore rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
  rules: Vec<IgnoreRule>,
}

impl IgnoreSet {
  /// Builds a set from `(pattern, kind)` pairs.
  ///
  /// # Errors
  ///
  /// Fails on the first pattern rule whose regex does not compile.
  pub fn new<S: Into<String>>(rules: impl IntoIterator<Item = (S, MatchKind)>) -> Result<Self, FilecenseError> {
    let mut set = Self::default();
    set.extend(rules)?;
    Ok(set)
  }

  /// The built-in directory rules.
  pub fn default_dirs() -> Result<Self, FilecenseError> {
    Self::new(DEFAULT_DIR_RULES.iter().copied())
  }

  /// The built-in file rules.
  pub fn default_files() -> Result<Self, FilecenseError> {
    Self::new(DEFAULT_FILE_RULES.iter().copied())
  }

  /// Adds a rule. A pattern already in the set keeps its position and takes
  /// the new kind.
  pub fn insert(&mut self, pattern: impl Into<String>, kind: MatchKind) -> Result<(), FilecenseError> {
    let rule = IgnoreRule::new(pattern, kind)?;
    match self.rules.iter_mut().find(|existing| existing.pattern == rule.pattern) {
      Some(existing) => *existing = rule,
      None => self.rules.push(rule),
    }
    Ok(())
  }

  /// Adds every `(pattern, kind)` pair in order.
  pub fn extend<S: Into<String>>(
    &mut self,
    rules: impl IntoIterator<Item = (S, MatchKind)>,
  ) -> Result<(), FilecenseError> {
    for (pattern, kind) in rules {
      self.insert(pattern, kind)?;
    }
    Ok(())
  }

  /// Returns `true` if any rule matches `name`.
  pub fn is_ignored(&self, name: &str) -> bool {
    self.matching_rule(name).is_some()
  }

  /// The first rule matching `name`, for diagnostics.
  pub fn matching_rule(&self, name: &str) -> Option<&IgnoreRule> {
    self.rules.iter().find(|rule| rule.is_match(name))
  }

  pub fn rules(&self) -> &[IgnoreRule] {
    &self.rules
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }
}

fn compile(pattern: &str) -> Result<Regex, FilecenseError> {
  Regex::new(pattern).map_err(|source| FilecenseError::InvalidPattern {
    pattern: pattern.to_string(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exact_rule_is_string_equality() {
    let set = IgnoreSet::new([("testdata", MatchKind::Exact)]).unwrap();
    assert!(set.is_ignored("testdata"));
    assert!(!set.is_ignored("testdata2"));
    assert!(!set.is_ignored("my_testdata"));
  }

  #[test]
  fn test_pattern_rule_is_unanchored_search() {
    let set = IgnoreSet::new([("gen", MatchKind::Pattern)]).unwrap();
    assert!(set.is_ignored("generated.rs"));
    assert!(set.is_ignored("codegen.rs"));
    assert!(!set.is_ignored("main.rs"));
  }

  #[test]
  fn test_default_dirs() {
    let dirs = IgnoreSet::default_dirs().unwrap();
    for name in [".git", "testdata", "node_modules", "vendor", "target", "__pycache__", ".hidden"] {
      assert!(dirs.is_ignored(name), "{name} should be ignored");
    }
    assert!(!dirs.is_ignored("src"));
    assert!(!dirs.is_ignored("asdoijsa"));
    // a lone dot is the current directory, not a hidden one
    assert!(!dirs.is_ignored("."));
  }

  #[test]
  fn test_default_files() {
    let files = IgnoreSet::default_files().unwrap();
    for name in [
      "binFile",
      ".hiddenFile",
      "README",
      "README.md",
      "picture.jpg",
      "logo.svg",
      "guide.md",
      "data.json",
      "notes.txt",
      "config.yml",
      "config.yaml",
      "pom.xml",
      "yarn.lock",
      "favicon.ico",
    ] {
      assert!(files.is_ignored(name), "{name} should be ignored");
    }
    for name in ["source.go", "main.c", "my-file", "index.html", "style.css"] {
      assert!(!files.is_ignored(name), "{name} should not be ignored");
    }
  }

  #[test]
  fn test_invalid_pattern_fails_at_construction() {
    let err = IgnoreSet::new([("(unclosed", MatchKind::Pattern)]).unwrap_err();
    assert!(matches!(err, FilecenseError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));

    // the same text is fine as an exact rule
    assert!(IgnoreSet::new([("(unclosed", MatchKind::Exact)]).is_ok());
  }

  #[test]
  fn test_insert_existing_pattern_replaces_kind_in_place() {
    let mut set = IgnoreSet::new([("a.c", MatchKind::Exact), ("b", MatchKind::Exact)]).unwrap();
    set.insert("a.c", MatchKind::Pattern).unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.rules()[0].pattern(), "a.c");
    assert_eq!(set.rules()[0].kind(), MatchKind::Pattern);
    // "." now matches any character
    assert!(set.is_ignored("abc"));
  }

  #[test]
  fn test_matching_rule_reports_first_match() {
    let set = IgnoreSet::new([(r"\.json$", MatchKind::Pattern), ("package-lock.json", MatchKind::Exact)]).unwrap();
    let rule = set.matching_rule("package-lock.json").unwrap();
    assert_eq!(rule.pattern(), r"\.json$");
    assert_eq!(rule.to_string(), r"pattern '\.json$'");
    assert!(set.matching_rule("main.rs").is_none());
  }

  #[test]
  fn test_outcome_independent_of_order() {
    let forward = IgnoreSet::new([("x", MatchKind::Exact), ("^y", MatchKind::Pattern)]).unwrap();
    let backward = IgnoreSet::new([("^y", MatchKind::Pattern), ("x", MatchKind::Exact)]).unwrap();
    for name in ["x", "yes", "no", "xy"] {
      assert_eq!(forward.is_ignored(name), backward.is_ignored(name));
    }
  }
}
