//! Running invocations and cleaning up after them.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::invocation::Invocation;

/// Why a build did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
  /// The process ran and exited unsuccessfully. `code` is `None` when killed by a signal.
  Exit { code: Option<i32> },
  /// The process could not be started.
  Launch { program: String, message: String },
}

impl fmt::Display for FailureReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FailureReason::Exit { code: Some(code) } => write!(f, "exited with status {}", code),
      FailureReason::Exit { code: None } => write!(f, "terminated by signal"),
      FailureReason::Launch { program, message } => write!(f, "failed to launch {}: {}", program, message),
    }
  }
}

/// Run `invocation` from `cwd` and wait for it.
///
/// Standard streams are inherited, so the build's own diagnostics reach the user.
pub async fn invoke(invocation: &Invocation, cwd: &Path) -> Result<(), FailureReason> {
  let mut command = Command::new(&invocation.program);
  command.args(&invocation.args).current_dir(cwd);

  if let Some(env) = &invocation.env {
    command.env_clear().envs(env);
  }

  debug!(program = %invocation.program, args = ?invocation.args, cwd = %cwd.display(), "spawning process");

  let status = command.status().await.map_err(|e| FailureReason::Launch {
    program: invocation.program.clone(),
    message: e.to_string(),
  })?;

  if status.success() {
    Ok(())
  } else {
    Err(FailureReason::Exit { code: status.code() })
  }
}

/// Delete a single-file build's output.
///
/// Never fails the run. A missing artifact is expected when compilation failed.
pub async fn remove_artifact(path: &Path) {
  match tokio::fs::remove_file(path).await {
    Ok(()) => debug!(path = %path.display(), "removed build artifact"),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "no build artifact to remove");
    }
    Err(e) => warn!(path = %path.display(), error = %e, "failed to remove build artifact"),
  }
}
