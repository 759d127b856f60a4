//! # Content Transformer Module
//!
//! This module splits a leading shebang off file content and splices a
//! rendered header back in right after it.

use regex::Regex;

use crate::error::FilecenseError;

/// A shebang is `#!/` followed by at least one more character on the first
/// line.
const SHEBANG_PATTERN: &str = r"^#!/.+$";

/// Content transformation utilities for header insertion.
///
/// The `ContentTransformer` handles:
/// - Extracting a shebang line that must stay first in the file
/// - Checking whether the rest of the file already starts with the header
/// - Building the new content with the header inserted
#[derive(Debug, Clone)]
pub struct ContentTransformer {
  shebang: Regex,
}

impl ContentTransformer {
  /// Creates a transformer with its shebang matcher compiled.
  pub fn new() -> Result<Self, FilecenseError> {
    let shebang = Regex::new(SHEBANG_PATTERN).map_err(|source| FilecenseError::InvalidPattern {
      pattern: SHEBANG_PATTERN.to_string(),
      source,
    })?;
    Ok(Self { shebang })
  }

  /// Splits off the shebang line.
  ///
  /// # Returns
  ///
  /// A tuple containing:
  /// - The shebang line including its newline, if the file starts with one
  /// - The remaining content
  pub fn extract_shebang<'a>(&self, content: &'a str) -> (Option<&'a str>, &'a str) {
    let first_line_end = content.find('\n').map_or(content.len(), |idx| idx + 1);
    let first_line = &content[..first_line_end];
    let bare = first_line.strip_suffix('\n').unwrap_or(first_line);

    if self.shebang.is_match(bare) {
      (Some(first_line), &content[first_line_end..])
    } else {
      (None, content)
    }
  }

  /// Returns `true` if the content after any shebang starts with `header`.
  pub fn has_header(&self, content: &str, header: &str) -> bool {
    let (_, rest) = self.extract_shebang(content);
    rest.starts_with(header)
  }

  /// Builds the new file content: shebang (if any), then the header, a blank
  /// separator line, then the original body.
  pub fn insert_header(&self, content: &str, header: &str) -> String {
    let (shebang, rest) = self.extract_shebang(content);

    let mut result = String::with_capacity(content.len() + header.len() + 2);
    if let Some(line) = shebang {
      result.push_str(line);
      if !line.ends_with('\n') {
        result.push('\n');
      }
    }
    result.push_str(header);
    result.push('\n');
    result.push_str(rest);
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &str = "#\n# Copyright 2024 Jane Doe\n#\n";

  fn transformer() -> ContentTransformer {
    ContentTransformer::new().unwrap()
  }

  #[test]
  fn test_extract_shebang() {
    let (shebang, rest) = transformer().extract_shebang("#!/bin/bash\necho hello");
    assert_eq!(shebang, Some("#!/bin/bash\n"));
    assert_eq!(rest, "echo hello");
  }

  #[test]
  fn test_extract_shebang_none() {
    let content = "// Some code\nfn main() {}";
    let (shebang, rest) = transformer().extract_shebang(content);
    assert_eq!(shebang, None);
    assert_eq!(rest, content);
  }

  #[test]
  fn test_bare_hash_bang_is_not_a_shebang() {
    for content in ["#!/\nbody", "#!bash\nbody", "# !/bin/sh\n"] {
      let (shebang, _) = transformer().extract_shebang(content);
      assert_eq!(shebang, None, "{content:?}");
    }
  }

  #[test]
  fn test_insert_header_plain() {
    let updated = transformer().insert_header("print('hi')\n", HEADER);
    assert_eq!(updated, format!("{HEADER}\nprint('hi')\n"));
  }

  #[test]
  fn test_insert_header_after_shebang() {
    let content = "#!/usr/bin/env python3\nprint('hi')\n";
    let updated = transformer().insert_header(content, HEADER);
    assert_eq!(updated, format!("#!/usr/bin/env python3\n{HEADER}\nprint('hi')\n"));
  }

  #[test]
  fn test_insert_header_shebang_without_newline() {
    let updated = transformer().insert_header("#!/bin/sh", HEADER);
    assert_eq!(updated, format!("#!/bin/sh\n{HEADER}\n"));
  }

  #[test]
  fn test_insert_header_empty_file() {
    assert_eq!(transformer().insert_header("", HEADER), format!("{HEADER}\n"));
  }

  #[test]
  fn test_has_header_after_insert() {
    let t = transformer();
    for content in ["", "body\n", "#!/bin/sh\nbody\n", "#!/bin/sh"] {
      assert!(!t.has_header(content, HEADER));
      let updated = t.insert_header(content, HEADER);
      assert!(t.has_header(&updated, HEADER), "{content:?}");
    }
  }

  #[test]
  fn test_has_header_requires_exact_prefix() {
    let t = transformer();
    let shifted = format!("\n{HEADER}body");
    assert!(!t.has_header(&shifted, HEADER));
    let other_year = HEADER.replace("2024", "2023");
    assert!(!t.has_header(&format!("{other_year}\nbody"), HEADER));
  }
}
