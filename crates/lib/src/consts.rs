/// Suffix identifying a single-file example.
pub const SOURCE_SUFFIX: &str = ".cx";

/// Data directory shared by examples; never built.
pub const INPUTS_DIR: &str = "inputs";

/// Entries that cannot be built on Windows hosts.
pub const WINDOWS_EXCLUDED: &[&str] = &["tree.cx", "asteroids", "opengl"];

/// Compiler used when none is configured, resolved through PATH.
pub const DEFAULT_COMPILER: &str = "cx";

pub const OUTPUT_FLAG: &str = "-o";
pub const WERROR_FLAG: &str = "-Werror";

/// Build tool invoked for project directories.
pub const BUILD_TOOL: &str = "make";
pub const BUILD_TOOL_DIR_FLAG: &str = "-C";

/// Make variable carrying the extra compiler arguments into project builds.
pub const CXFLAGS_VAR: &str = "CXFLAGS";

pub const SEARCH_PATH_VAR: &str = "PATH";
