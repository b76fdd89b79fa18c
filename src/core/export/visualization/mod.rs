//! Raster preview: radial layout, font lookup and PNG rendering

pub mod fonts;
pub mod image;
pub mod layout;

pub use fonts::{FontResolver, ResolvedFont};
pub use image::{ImageGenerator, ImageSettings, Scene};
pub use layout::{LayoutSettings, Placement, RadialLayout};
