//! Shared helpers used by both the library and the CLI binary

pub mod logger;

/// Returns the current version of the `mindmap-export` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
