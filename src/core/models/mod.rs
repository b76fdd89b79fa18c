//! Data models for mind-map generation

pub mod color;
pub mod node;
pub mod theme;

pub use color::Rgb;
pub use node::{FontStyle, FontWeight, MindMapNode, NodeColors, NodeFont};
pub use theme::{ColorScheme, MindMapTheme, COLOR_SCHEMES};
