//! Construction of build command lines.
//!
//! Invocations are plain data so the exact argv and environment of each build
//! can be inspected without spawning anything.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use crate::config::DriverConfig;
use crate::consts::{BUILD_TOOL, BUILD_TOOL_DIR_FLAG, CXFLAGS_VAR, OUTPUT_FLAG, SEARCH_PATH_VAR, WERROR_FLAG};
use crate::error::DriverError;
use crate::platform::Os;

/// A single child process to run from the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  /// Complete child environment. `None` inherits the driver's environment.
  pub env: Option<BTreeMap<OsString, OsString>>,
}

impl Invocation {
  /// `<compiler> <source> -o <artifact> -Werror <extra...>`
  pub fn single_file(config: &DriverConfig, source: &str, artifact: &str) -> Self {
    let mut args = vec![
      source.to_string(),
      OUTPUT_FLAG.to_string(),
      artifact.to_string(),
      WERROR_FLAG.to_string(),
    ];
    args.extend(config.extra_args.iter().cloned());

    Self {
      program: config.compiler.clone(),
      args,
      env: None,
    }
  }

  /// `make -C <dir> CXFLAGS=<extra...>` with the compiler's directory first on PATH.
  ///
  /// `base_env` is the environment to copy, normally `std::env::vars_os()`.
  pub fn project<I>(config: &DriverConfig, dir: &str, base_env: I) -> Result<Self, DriverError>
  where
    I: IntoIterator<Item = (OsString, OsString)>,
  {
    let env = project_env(&config.compiler, base_env, config.os)?;

    Ok(Self {
      program: BUILD_TOOL.to_string(),
      args: vec![
        BUILD_TOOL_DIR_FLAG.to_string(),
        dir.to_string(),
        cxflags_assignment(&config.extra_args),
      ],
      env: Some(env),
    })
  }
}

/// `CXFLAGS=<args joined by single spaces>`
pub fn cxflags_assignment(extra_args: &[String]) -> String {
  format!("{}={}", CXFLAGS_VAR, extra_args.join(" "))
}

/// Directory portion of a compiler reference, if it has one.
pub fn compiler_dir(compiler: &str) -> Option<&Path> {
  Path::new(compiler).parent().filter(|p| !p.as_os_str().is_empty())
}

/// Copy `base_env` and prepend the compiler's directory to its search path.
///
/// A bare compiler name leaves the copy unchanged.
pub fn project_env<I>(compiler: &str, base_env: I, os: Os) -> Result<BTreeMap<OsString, OsString>, DriverError>
where
  I: IntoIterator<Item = (OsString, OsString)>,
{
  let mut env: BTreeMap<OsString, OsString> = base_env.into_iter().collect();

  let Some(dir) = compiler_dir(compiler) else {
    return Ok(env);
  };

  let key = search_path_key(&env, os);
  let mut paths = vec![dir.to_path_buf()];
  if let Some(existing) = env.get(&key).filter(|v| !v.is_empty()) {
    paths.extend(std::env::split_paths(existing));
  }

  let joined = std::env::join_paths(paths).map_err(|source| DriverError::SearchPath {
    dir: dir.to_path_buf(),
    source,
  })?;
  env.insert(key, joined);

  Ok(env)
}

// Windows environment names are case-insensitive and PATH is usually spelled `Path`.
fn search_path_key(env: &BTreeMap<OsString, OsString>, os: Os) -> OsString {
  if os.is_windows_family() {
    if let Some(key) = env
      .keys()
      .find(|k| k.to_str().is_some_and(|k| k.eq_ignore_ascii_case(SEARCH_PATH_VAR)))
    {
      return key.clone();
    }
  }
  OsString::from(SEARCH_PATH_VAR)
}
