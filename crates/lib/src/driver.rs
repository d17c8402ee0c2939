//! The build loop.
//!
//! Entries are built one at a time in listing order. The first failing build
//! ends the run; entries after it are never attempted.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::DriverConfig;
use crate::entry::{EntryKind, Plan, discover};
use crate::error::DriverError;
use crate::execute::{FailureReason, invoke, remove_artifact};
use crate::invocation::Invocation;

/// Entries processed by a run that completed without a failing build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  pub built: Vec<String>,
  pub skipped: Vec<String>,
  pub ignored: Vec<String>,
}

/// The build that stopped the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFailure {
  pub entry: String,
  pub reason: FailureReason,
  /// Entries that built successfully before the failure.
  pub built_before: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
  Succeeded(RunSummary),
  Failed(BuildFailure),
}

impl RunOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, RunOutcome::Succeeded(_))
  }

  /// Process exit code for this outcome.
  pub fn exit_code(&self) -> i32 {
    if self.is_success() { 0 } else { 1 }
  }
}

/// Discover and build every example under `config.working_dir`.
pub async fn run(config: &DriverConfig) -> Result<RunOutcome, DriverError> {
  let plan = discover(&config.working_dir, config.os).await?;
  info!(
    dir = %config.working_dir.display(),
    entries = plan.entries.len(),
    buildable = plan.build_count(),
    "discovered examples"
  );
  execute_plan(config, &plan).await
}

/// Build the entries of `plan` in order, stopping at the first failure.
pub async fn execute_plan(config: &DriverConfig, plan: &Plan) -> Result<RunOutcome, DriverError> {
  let mut summary = RunSummary::default();

  for entry in &plan.entries {
    let result = match &entry.kind {
      EntryKind::Skipped => {
        debug!(name = %entry.name, os = %config.os, "skipping excluded entry");
        summary.skipped.push(entry.name.clone());
        continue;
      }
      EntryKind::Ignored => {
        summary.ignored.push(entry.name.clone());
        continue;
      }
      EntryKind::SingleFile { artifact } => {
        info!(name = %entry.name, "building example");
        let invocation = Invocation::single_file(config, &entry.name, artifact);
        let result = invoke(&invocation, &config.working_dir).await;
        remove_artifact(&config.working_dir.join(artifact)).await;
        result
      }
      EntryKind::Project => {
        info!(name = %entry.name, "building project");
        let invocation = Invocation::project(config, &entry.name, std::env::vars_os())?;
        invoke(&invocation, &config.working_dir).await
      }
    };

    if let Err(reason) = result {
      info!(name = %entry.name, %reason, "build failed");
      return Ok(RunOutcome::Failed(BuildFailure {
        entry: entry.name.clone(),
        reason,
        built_before: summary.built,
      }));
    }

    summary.built.push(entry.name.clone());
  }

  Ok(RunOutcome::Succeeded(summary))
}
