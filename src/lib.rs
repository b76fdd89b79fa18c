//! Mind map export library
//!
//! Builds a styled node tree from a nested outline record and serializes it
//! to spreadsheet, JSON, Markdown, OPML, FreeMind or a PNG preview.

pub mod core;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
