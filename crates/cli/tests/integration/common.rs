//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Fails on sources containing `invalid`, otherwise writes the `-o` output.
/// Sources containing `warning` fail after the output is written.
const FAKE_CX: &str = r#"#!/bin/sh
printf 'cx %s\n' "$*" >> "$(dirname "$0")/calls.log"
if grep -q invalid "$1"; then
  echo "$1: error: invalid syntax" >&2
  exit 1
fi
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then
    : > "$arg"
    printf '%s\n' "$arg" >> "$(dirname "$0")/outputs.log"
  fi
  prev="$arg"
done
if grep -q warning "$1"; then
  echo "$1: error: warning treated as error" >&2
  exit 1
fi
"#;

/// Records argv and PATH; fails when the project contains a `fail` marker.
const FAKE_MAKE: &str = r#"#!/bin/sh
printf 'make %s\n' "$*" >> "$(dirname "$0")/calls.log"
printf '%s\n' "$PATH" >> "$(dirname "$0")/path.log"
if [ -e "$2/fail" ]; then
  exit 2
fi
"#;

/// Isolated examples directory plus a fake `cx` and `make`.
pub struct TestEnv {
  _temp: TempDir,
  pub examples: PathBuf,
  pub bin_dir: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let examples = root.join("examples");
    let bin_dir = root.join("bin");
    std::fs::create_dir_all(&examples).unwrap();
    std::fs::create_dir_all(&bin_dir).unwrap();
    write_script(&bin_dir.join("cx"), FAKE_CX);
    write_script(&bin_dir.join("make"), FAKE_MAKE);
    Self {
      _temp: temp,
      examples,
      bin_dir,
    }
  }

  /// Write a single-file example.
  pub fn source(&self, name: &str, content: &str) -> &Self {
    std::fs::write(self.examples.join(name), content).unwrap();
    self
  }

  /// Create a project directory with a Makefile.
  pub fn project(&self, name: &str) -> &Self {
    let dir = self.examples.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Makefile"), "all:\n\t$(CX) main.cx $(CXFLAGS)\n").unwrap();
    self
  }

  /// Create a data-only `inputs` directory.
  pub fn inputs(&self) -> &Self {
    let dir = self.examples.join("inputs");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("words.txt"), "alpha beta").unwrap();
    self
  }

  pub fn compiler(&self) -> PathBuf {
    self.bin_dir.join("cx")
  }

  pub fn calls(&self) -> Vec<String> {
    read_lines(&self.bin_dir.join("calls.log"))
  }

  pub fn outputs(&self) -> Vec<String> {
    read_lines(&self.bin_dir.join("outputs.log"))
  }

  pub fn make_paths(&self) -> Vec<String> {
    read_lines(&self.bin_dir.join("path.log"))
  }

  /// The binary, pointed at the examples directory and the fake compiler.
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("build-examples");
    cmd.env_remove("CX");
    cmd.arg("-C").arg(&self.examples);
    cmd.arg("--cx").arg(self.compiler());
    cmd
  }
}

fn write_script(path: &Path, content: &str) {
  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
  std::fs::read_to_string(path)
    .map(|s| s.lines().map(str::to_string).collect())
    .unwrap_or_default()
}
