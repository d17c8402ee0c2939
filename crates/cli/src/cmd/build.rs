//! Implementation of the default build run.
//!
//! Builds every example in the configured directory and reports the outcome.
//! A failing build prints nothing beyond its own diagnostics unless it could
//! not be launched at all.

use std::time::Instant;

use anyhow::{Context, Result};

use cxb_lib::{DriverConfig, FailureReason, RunOutcome, run};

use crate::output::{OutputFormat, format_duration, print_error, print_json, print_stat, print_success};

pub const SUCCESS_MESSAGE: &str = "All examples built successfully.";

pub fn cmd_build(config: &DriverConfig, output: OutputFormat, verbose: bool) -> Result<RunOutcome> {
  let start = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt.block_on(run(config)).context("Build run failed")?;

  if output.is_json() {
    print_json(&outcome)?;
    return Ok(outcome);
  }

  match &outcome {
    RunOutcome::Succeeded(summary) => {
      print_success(SUCCESS_MESSAGE);
      if verbose {
        print_stat("Built", &summary.built.len().to_string());
        if !summary.skipped.is_empty() {
          print_stat("Skipped", &summary.skipped.join(", "));
        }
        print_stat("Duration", &format_duration(start.elapsed()));
      }
    }
    RunOutcome::Failed(failure) => {
      if let FailureReason::Launch { .. } = failure.reason {
        print_error(&format!("{}: {}", failure.entry, failure.reason));
      }
    }
  }

  Ok(outcome)
}
