//! Dry run: show how each entry would be handled.

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use cxb_lib::invocation::Invocation;
use cxb_lib::{DriverConfig, Entry, EntryKind, discover};

use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols};

pub fn cmd_plan(config: &DriverConfig, output: OutputFormat) -> Result<()> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let plan = rt
    .block_on(discover(&config.working_dir, config.os))
    .context("Failed to scan examples directory")?;

  if output.is_json() {
    return print_json(&plan);
  }

  print_info(&format!("Examples in {}", config.working_dir.display()));
  println!();

  for entry in &plan.entries {
    print_entry(config, entry)?;
  }

  println!();
  print_stat("Would build", &plan.build_count().to_string());

  Ok(())
}

fn print_entry(config: &DriverConfig, entry: &Entry) -> Result<()> {
  let invocation = match &entry.kind {
    EntryKind::SingleFile { artifact } => Some(Invocation::single_file(config, &entry.name, artifact)),
    EntryKind::Project => Some(Invocation::project(config, &entry.name, std::env::vars_os())?),
    EntryKind::Skipped | EntryKind::Ignored => None,
  };

  match invocation {
    Some(invocation) => {
      println!(
        "  {} {} {}",
        symbols::BUILD.if_supports_color(Stream::Stdout, |s| s.green()),
        entry.name,
        format!("({})", entry.kind.description()).if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
      println!(
        "      {} {}",
        invocation.program.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        invocation.args.join(" ").if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
    None => {
      println!(
        "  {} {}",
        symbols::SKIP.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        entry.if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
  }

  Ok(())
}
