//! Discovery and classification of example entries.
//!
//! Each item directly under the working directory is classified on its own,
//! in the order the filesystem lists it:
//! - Windows-excluded names are skipped on Windows hosts
//! - `*.cx` files are single-file examples
//! - directories other than `inputs` are project directories
//! - everything else is ignored

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::consts::{BUILD_TOOL, INPUTS_DIR, SOURCE_SUFFIX, WINDOWS_EXCLUDED};
use crate::error::DriverError;
use crate::platform::Os;

/// How a single entry will be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryKind {
  /// Compiled directly; `artifact` is the output file removed after the build.
  SingleFile { artifact: String },
  /// Built with `make -C <name>`.
  Project,
  /// Excluded on this platform.
  Skipped,
  /// Not a build target.
  Ignored,
}

impl EntryKind {
  pub fn is_buildable(&self) -> bool {
    matches!(self, EntryKind::SingleFile { .. } | EntryKind::Project)
  }

  /// Short human-readable description of what happens to the entry.
  pub fn description(&self) -> String {
    match self {
      EntryKind::SingleFile { artifact } => format!("compile to {}", artifact),
      EntryKind::Project => format!("{} project", BUILD_TOOL),
      EntryKind::Skipped => "excluded on this platform".to_string(),
      EntryKind::Ignored => "ignored".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
  pub name: String,
  #[serde(flatten)]
  pub kind: EntryKind,
}

impl fmt::Display for Entry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.kind.description())
  }
}

/// Ordered classification of a working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
  pub entries: Vec<Entry>,
}

impl Plan {
  pub fn new(entries: Vec<Entry>) -> Self {
    Self { entries }
  }

  /// Number of entries that will be built.
  pub fn build_count(&self) -> usize {
    self.entries.iter().filter(|e| e.kind.is_buildable()).count()
  }
}

/// Output file name for a single-file example.
///
/// Strips the source suffix and appends the platform executable suffix.
/// Returns `None` when `source` lacks the suffix or has nothing before it.
pub fn artifact_name(source: &str, os: Os) -> Option<String> {
  let stem = source.strip_suffix(SOURCE_SUFFIX)?;
  if stem.is_empty() {
    return None;
  }
  Some(format!("{}{}", stem, os.exe_suffix()))
}

/// Classify one entry by name and type.
pub fn classify(name: &str, is_dir: bool, os: Os) -> EntryKind {
  if os.is_windows_family() && WINDOWS_EXCLUDED.contains(&name) {
    return EntryKind::Skipped;
  }

  if name.ends_with(SOURCE_SUFFIX) {
    return match artifact_name(name, os) {
      Some(artifact) => EntryKind::SingleFile { artifact },
      None => EntryKind::Ignored,
    };
  }

  if is_dir && name != INPUTS_DIR {
    return EntryKind::Project;
  }

  EntryKind::Ignored
}

/// List and classify the entries of `dir` in directory-listing order.
pub async fn discover(dir: &Path, os: Os) -> Result<Plan, DriverError> {
  let mut read_dir = tokio::fs::read_dir(dir).await.map_err(|source| DriverError::ReadDir {
    path: dir.to_path_buf(),
    source,
  })?;

  let mut entries = Vec::new();
  while let Some(dir_entry) = read_dir.next_entry().await.map_err(|source| DriverError::ReadEntry {
    path: dir.to_path_buf(),
    source,
  })? {
    let file_name = dir_entry.file_name();
    let Some(name) = file_name.to_str() else {
      debug!(name = ?file_name, "ignoring non UTF-8 entry");
      entries.push(Entry {
        name: file_name.to_string_lossy().into_owned(),
        kind: EntryKind::Ignored,
      });
      continue;
    };

    // Follows symlinks so a linked project directory is still built.
    let is_dir = tokio::fs::metadata(dir_entry.path())
      .await
      .map(|m| m.is_dir())
      .unwrap_or(false);

    let entry = Entry {
      name: name.to_string(),
      kind: classify(name, is_dir, os),
    };
    debug!(%entry, "classified entry");
    entries.push(entry);
  }

  Ok(Plan::new(entries))
}
