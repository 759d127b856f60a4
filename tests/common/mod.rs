#![allow(dead_code)]

use std::fs;
use std::path::Path;
use assert_cmd::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use tempfile::TempDir;

/// The MIT header for Jane Doe, 2024, framed with `//`.
pub const MIT_GO_HEADER: &str = "//
// Copyright 2024 Jane Doe
//
// Use of this source code is governed by the MIT License.
// The full license text can be found in the LICENSE file at the root of this
// project or at https://opensource.org/licenses/MIT.
//
";

/// The same header framed with `#`.
pub const MIT_HASH_HEADER: &str = "#
# Copyright 2024 Jane Doe
#
# Use of this source code is governed by the MIT License.
# The full license text can be found in the LICENSE file at the root of this
# project or at https://opensource.org/licenses/MIT.
#
";

/// Writes `content` at `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}

pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  Ok(fs::read_to_string(root.join(relative))?)
}

/// A small Go project:
///
/// ```text
/// .git/
/// src/main.go
/// vendor/ignored.go
/// README.md
/// ```
pub fn go_project() -> Result<TempDir> {
  let dir = tempfile::tempdir()?;
  fs::create_dir_all(dir.path().join(".git"))?;
  write_file(dir.path(), "src/main.go", "package main\n")?;
  write_file(dir.path(), "vendor/ignored.go", "package vendor\n")?;
  write_file(dir.path(), "README.md", "# Demo\n")?;
  Ok(dir)
}

/// The filecense binary, colors off, config discovery pinned to the scan path.
pub fn filecense() -> Result<Command> {
  let mut cmd = Command::cargo_bin("filecense")?;
  cmd.arg("--colors=never").env_remove("FILECENSE_CONFIG").env_remove("RUST_LOG");
  Ok(cmd)
}

/// `filecense -p <dir> --license mit --date 2024 --force`, holder appended by the caller.
pub fn filecense_mit(dir: &Path) -> Result<Command> {
  let mut cmd = filecense()?;
  cmd
    .arg("-p")
    .arg(dir)
    .args(["--license", "mit", "--date", "2024", "--force"]);
  Ok(cmd)
}
