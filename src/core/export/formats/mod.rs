//! File-format generators

pub mod excel;
pub mod freemind;
pub mod json;
pub mod markdown;
pub mod opml;
mod xml;

pub use excel::ExcelGenerator;
pub use freemind::FreeMindGenerator;
pub use json::JsonGenerator;
pub use markdown::MarkdownGenerator;
pub use opml::OpmlGenerator;
