//! CLI command handlers for `mindmap`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod generate;
pub mod themes;
