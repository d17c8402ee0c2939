//! Errors that stop a run before or between builds.
//!
//! A failing build is not an error: it is reported through
//! [`crate::driver::RunOutcome::Failed`].

use std::env::JoinPathsError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
  #[error("failed to read directory {path}: {source}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read entry in {path}: {source}")]
  ReadEntry {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("cannot prepend {dir} to PATH: {source}")]
  SearchPath {
    dir: PathBuf,
    #[source]
    source: JoinPathsError,
  },
}
