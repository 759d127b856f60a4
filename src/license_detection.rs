//! # License Detection Module
//!
//! This module contains the interfaces and implementations for deciding
//! whether a file already carries the header we are about to add.
//! It allows for replacing the detection algorithm without modifying the
//! processor.

/// Trait for license detectors.
///
/// Implementations receive the file body with any shebang line already
/// removed, and the rendered header that would be inserted.
pub trait LicenseDetector: Send + Sync {
  /// Checks if `body` already has `header`.
  fn has_license(&self, body: &str, header: &str) -> bool;
}

/// Exact prefix detection.
///
/// A file is licensed when its body starts with the rendered header byte for
/// byte. Any edit to the header (a different year, holder or comment style)
/// makes the file look unlicensed, and a second header is added above the
/// old one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixLicenseDetector;

impl PrefixLicenseDetector {
  pub const fn new() -> Self {
    Self
  }
}

impl LicenseDetector for PrefixLicenseDetector {
  fn has_license(&self, body: &str, header: &str) -> bool {
    body.starts_with(header)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HEADER: &str = "//\n// Copyright 2024 Jane Doe\n//\n";

  #[test]
  fn test_prefix_detector() {
    let detector = PrefixLicenseDetector::new();

    assert!(detector.has_license(&format!("{HEADER}\npackage main\n"), HEADER));
    assert!(detector.has_license(HEADER, HEADER));

    // Header present but not at the top
    assert!(!detector.has_license(&format!("package main\n{HEADER}"), HEADER));
    // Some other copyright line
    assert!(!detector.has_license("// Copyright 2023 Someone Else\n", HEADER));
    assert!(!detector.has_license("", HEADER));
  }
}
