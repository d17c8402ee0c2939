//! Driver configuration.
//!
//! Built once at startup and passed by reference into [`crate::driver::run`].

use std::path::PathBuf;

use crate::consts::DEFAULT_COMPILER;
use crate::platform::Os;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
  /// Compiler used for single-file examples. Either a bare command name or a path.
  pub compiler: String,
  /// Forwarded verbatim to every build.
  pub extra_args: Vec<String>,
  /// Directory whose entries are built.
  pub working_dir: PathBuf,
  pub os: Os,
}

impl DriverConfig {
  /// Configuration with the default compiler, no extra arguments and the host OS.
  pub fn new(working_dir: impl Into<PathBuf>) -> Self {
    Self {
      compiler: DEFAULT_COMPILER.to_string(),
      extra_args: Vec::new(),
      working_dir: working_dir.into(),
      os: Os::current(),
    }
  }

  pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
    self.compiler = compiler.into();
    self
  }

  pub fn with_extra_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.extra_args = args.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_os(mut self, os: Os) -> Self {
    self.os = os;
    self
  }
}
