//! Integration tests running build-examples against a fake toolchain.

#[cfg(unix)]
mod common;
