mod cmd;
mod output;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cxb_lib::consts::DEFAULT_COMPILER;
use cxb_lib::invocation::compiler_dir;
use cxb_lib::{DriverConfig, Os};

use crate::cmd::{cmd_build, cmd_plan};
use crate::output::OutputFormat;

const AFTER_HELP: &str = "\
Options may appear anywhere on the command line. Every other argument is passed,
in order, to every build: appended to the compiler command line for *.cx files
and as CXFLAGS for project directories.

To pass an argument that matches one of the options above (such as -o, -C or -v),
put it after `--`:

  build-examples --cx ./build/cx -O2 -- -v";

/// Build every cx example and stop at the first one that fails.
#[derive(Parser, Debug)]
#[command(name = "build-examples")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Cli {
  /// Path to the cx compiler executable
  #[arg(long = "cx", env = "CX", default_value = DEFAULT_COMPILER)]
  cx: String,

  /// Examples directory (default: current directory)
  #[arg(short = 'C', long = "dir", value_name = "DIR")]
  dir: Option<PathBuf>,

  /// Show how each entry would be built without building anything
  #[arg(long)]
  dry_run: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Extra arguments forwarded to every build
  #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "CX_ARGS")]
  cx_args: Vec<String>,
}

impl Cli {
  fn driver_config(&self) -> Result<DriverConfig> {
    let dir = match &self.dir {
      Some(dir) => dir.clone(),
      None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let working_dir =
      dunce::canonicalize(&dir).with_context(|| format!("Examples directory not found: {}", dir.display()))?;

    Ok(
      DriverConfig::new(working_dir)
        .with_compiler(resolve_compiler(&self.cx))
        .with_extra_args(self.cx_args.iter().cloned())
        .with_os(Os::current()),
    )
  }
}

/// Anchor a compiler path to the invoking directory.
///
/// Builds run from the examples directory, so a relative path like
/// `build/cx` would otherwise resolve against the wrong place. Bare names are
/// left for PATH lookup.
fn resolve_compiler(cx: &str) -> String {
  if compiler_dir(cx).is_none() {
    return cx.to_string();
  }
  let path = Path::new(cx);
  dunce::canonicalize(path)
    .or_else(|_| std::path::absolute(path))
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|_| cx.to_string())
}

/// Options taking a value, in both `--opt value` and `--opt=value` form.
const VALUE_OPTIONS: &[&str] = &["--cx", "-C", "--dir", "-o", "--output"];
const FLAG_OPTIONS: &[&str] = &["--dry-run", "-v", "--verbose", "-h", "--help", "-V", "--version"];

enum ArgKind {
  Separator,
  Flag,
  Valued,
  Inline,
  Forwarded,
}

fn arg_kind(arg: &OsStr) -> ArgKind {
  let Some(arg) = arg.to_str() else {
    return ArgKind::Forwarded;
  };
  if arg == "--" {
    ArgKind::Separator
  } else if FLAG_OPTIONS.contains(&arg) {
    ArgKind::Flag
  } else if VALUE_OPTIONS.contains(&arg) {
    ArgKind::Valued
  } else if VALUE_OPTIONS
    .iter()
    .any(|opt| opt.starts_with("--") && arg.strip_prefix(opt).is_some_and(|rest| rest.starts_with('=')))
  {
    ArgKind::Inline
  } else {
    ArgKind::Forwarded
  }
}

/// Reorder argv so the driver's own options come first and every other
/// argument follows a `--`, keeping its relative order.
///
/// clap stops option parsing at the first unknown argument of a trailing
/// list, so `-O2 --cx path` would otherwise forward `--cx` to the builds.
/// An explicit `--` forwards everything after it untouched.
fn split_args<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator,
  I::Item: Into<OsString>,
{
  let mut args = args.into_iter().map(Into::into);
  let mut own: Vec<OsString> = args.next().into_iter().collect();
  let mut forwarded = Vec::new();

  while let Some(arg) = args.next() {
    match arg_kind(&arg) {
      ArgKind::Separator => {
        forwarded.extend(args.by_ref());
        break;
      }
      ArgKind::Flag | ArgKind::Inline => own.push(arg),
      ArgKind::Valued => {
        own.push(arg);
        own.extend(args.next());
      }
      ArgKind::Forwarded => forwarded.push(arg),
    }
  }

  own.push("--".into());
  own.extend(forwarded);
  own
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse_from(split_args(std::env::args_os()));
  init_tracing(cli.verbose);

  let config = cli.driver_config()?;
  debug!(
    compiler = %config.compiler,
    dir = %config.working_dir.display(),
    os = %config.os,
    extra_args = ?config.extra_args,
    "resolved configuration"
  );

  if cli.dry_run {
    return cmd_plan(&config, cli.output);
  }

  let outcome = cmd_build(&config, cli.output, cli.verbose)?;
  if !outcome.is_success() {
    std::process::exit(outcome.exit_code());
  }

  Ok(())
}
