//! # Licenses Module
//!
//! The built-in licenses. Each entry carries a short `top` notice that goes
//! into every source file and the `full` text written once at the project
//! root. Both may contain `{{year}}` and `{{holder}}` placeholders.

use crate::error::FilecenseError;
use crate::templates::LicenseData;

/// A license known to filecense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct License {
  /// Key used on the command line (`--license mit`)
  pub key: &'static str,
  /// Human readable name
  pub name: &'static str,
  /// Notice prepended to each source file
  pub top: &'static str,
  /// Text of the license file
  pub full: &'static str,
}

impl License {
  /// The full text with year and holder filled in.
  pub fn render_full(&self, data: &LicenseData) -> String {
    data.render(self.full)
  }
}

const BUILTIN: &[License] = &[
  License {
    key: "eupl",
    name: "European Union Public Licence 1.2",
    top: include_str!("../licenses/eupl.top.txt"),
    full: include_str!("../licenses/eupl.full.txt"),
  },
  License {
    key: "mit",
    name: "MIT License",
    top: include_str!("../licenses/mit.top.txt"),
    full: include_str!("../licenses/mit.full.txt"),
  },
  License {
    key: "gpl",
    name: "GNU General Public License v3.0",
    top: include_str!("../licenses/gpl.top.txt"),
    full: include_str!("../licenses/gpl.full.txt"),
  },
  License {
    key: "agpl",
    name: "GNU Affero General Public License v3.0",
    top: include_str!("../licenses/agpl.top.txt"),
    full: include_str!("../licenses/agpl.full.txt"),
  },
  License {
    key: "mozilla",
    name: "Mozilla Public License 2.0",
    top: include_str!("../licenses/mozilla.top.txt"),
    full: include_str!("../licenses/mozilla.full.txt"),
  },
  License {
    key: "unlicense",
    name: "The Unlicense",
    top: include_str!("../licenses/unlicense.top.txt"),
    full: include_str!("../licenses/unlicense.full.txt"),
  },
  License {
    key: "beer",
    name: "Beerware License (Revision 42)",
    top: include_str!("../licenses/beer.top.txt"),
    full: include_str!("../licenses/beer.full.txt"),
  },
];

/// Immutable table of licenses, built once at startup.
#[derive(Debug, Clone, Copy)]
pub struct LicenseRegistry {
  licenses: &'static [License],
}

impl Default for LicenseRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

impl LicenseRegistry {
  /// The registry of licenses shipped with filecense.
  pub const fn builtin() -> Self {
    Self { licenses: BUILTIN }
  }

  /// Looks up a license by key.
  ///
  /// # Errors
  ///
  /// [`FilecenseError::UnsupportedLicense`] when the key is unknown.
  pub fn get(&self, key: &str) -> Result<&'static License, FilecenseError> {
    self
      .licenses
      .iter()
      .find(|license| license.key == key)
      .ok_or_else(|| FilecenseError::UnsupportedLicense {
        key: key.to_string(),
        available: self.keys().collect::<Vec<_>>().join(", "),
      })
  }

  pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.licenses.iter().map(|license| license.key)
  }

  pub fn iter(&self) -> impl Iterator<Item = &'static License> + '_ {
    self.licenses.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn data() -> LicenseData {
    LicenseData {
      year: 2024,
      holder: "Jane Doe".to_string(),
    }
  }

  #[test]
  fn test_builtin_keys() {
    let keys: Vec<_> = LicenseRegistry::builtin().keys().collect();
    assert_eq!(keys, ["eupl", "mit", "gpl", "agpl", "mozilla", "unlicense", "beer"]);
  }

  #[test]
  fn test_unknown_key() {
    let err = LicenseRegistry::builtin().get("doesnotexist").unwrap_err();
    match err {
      FilecenseError::UnsupportedLicense { key, available } => {
        assert_eq!(key, "doesnotexist");
        assert!(available.contains("eupl"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_render_eupl_top() {
    let eupl = LicenseRegistry::builtin().get("eupl").unwrap();
    let top = data().render(eupl.top);
    assert!(top.starts_with("Copyright 2024 Jane Doe\n"));
    assert!(!top.contains("{{"));
  }

  #[test]
  fn test_render_mit_full() {
    let mit = LicenseRegistry::builtin().get("mit").unwrap();
    let full = mit.render_full(&data());
    assert!(full.starts_with("MIT License"));
    assert!(full.contains("Copyright (c) 2024 Jane Doe"));
  }

  #[test]
  fn test_every_license_has_text() {
    for license in LicenseRegistry::builtin().iter() {
      assert!(!license.top.trim().is_empty(), "{} top", license.key);
      assert!(!license.full.trim().is_empty(), "{} full", license.key);
    }
  }
}
