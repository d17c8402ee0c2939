//! Test utilities for cxb-lib.
//!
//! Cross-platform shell helpers plus a fake `cx` compiler and fake `make`
//! that record how they were called.

#[cfg(unix)]
use std::path::{Path, PathBuf};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Fake compiler:
/// - fails without output when the source contains `invalid`
/// - otherwise creates the `-o` output file
/// - then fails when the source contains `warning`, like `-Werror`
#[cfg(unix)]
const FAKE_CX: &str = r#"#!/bin/sh
printf 'cx %s\n' "$*" >> "$(dirname "$0")/calls.log"
if grep -q invalid "$1"; then
  echo "error: invalid syntax in $1" >&2
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
exit 0
"#;

/// Fake make: records argv and PATH, fails when the project has a `fail` marker.
#[cfg(unix)]
const FAKE_MAKE: &str = r#"#!/bin/sh
printf 'make %s\n' "$*" >> "$(dirname "$0")/calls.log"
printf '%s\n' "$PATH" >> "$(dirname "$0")/path.log"
if [ -e "$2/fail" ]; then
  exit 2
fi
exit 0
"#;

/// A directory holding the fake `cx` and `make` scripts.
#[cfg(unix)]
pub struct FakeToolchain {
  pub bin_dir: PathBuf,
}

#[cfg(unix)]
impl FakeToolchain {
  pub fn install(root: &Path) -> Self {
    let bin_dir = root.join("toolchain-bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    write_script(&bin_dir.join("cx"), FAKE_CX);
    write_script(&bin_dir.join("make"), FAKE_MAKE);
    Self { bin_dir }
  }

  /// Absolute compiler reference.
  pub fn compiler(&self) -> String {
    self.bin_dir.join("cx").to_string_lossy().into_owned()
  }

  /// Every recorded invocation, in order, as `"<tool> <args>"`.
  pub fn calls(&self) -> Vec<String> {
    read_lines(&self.bin_dir.join("calls.log"))
  }

  /// Output files the fake compiler created.
  pub fn outputs(&self) -> Vec<String> {
    read_lines(&self.bin_dir.join("outputs.log"))
  }

  /// PATH seen by each `make` invocation.
  pub fn make_paths(&self) -> Vec<String> {
    read_lines(&self.bin_dir.join("path.log"))
  }
}

#[cfg(unix)]
fn write_script(path: &Path, content: &str) {
  use std::os::unix::fs::PermissionsExt;

  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
fn read_lines(path: &Path) -> Vec<String> {
  std::fs::read_to_string(path)
    .map(|s| s.lines().map(str::to_string).collect())
    .unwrap_or_default()
}
