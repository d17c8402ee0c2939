//! cxb-lib: build verification for the cx example collection.
//!
//! Every entry of an examples directory is classified and built on its own:
//! - `*.cx` files are compiled directly and their output deleted
//! - project directories are built with `make`
//!
//! The run stops at the first failing build.

pub mod config;
pub mod consts;
pub mod driver;
pub mod entry;
pub mod error;
pub mod execute;
pub mod invocation;
pub mod platform;
pub mod util;

pub use config::DriverConfig;
pub use driver::{BuildFailure, RunOutcome, RunSummary, execute_plan, run};
pub use entry::{Entry, EntryKind, Plan, classify, discover};
pub use error::DriverError;
pub use execute::FailureReason;
pub use platform::Os;
