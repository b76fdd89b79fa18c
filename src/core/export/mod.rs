//! Document generation
//!
//! Each output kind is an independent implementation of [`MindMapGenerator`]:
//! it reads a finished tree and returns the complete file contents.
//! [`OutputFormat`] is the closed set the facade dispatches over.

pub mod formats;
pub mod visualization;

pub use formats::{ExcelGenerator, FreeMindGenerator, JsonGenerator, MarkdownGenerator, OpmlGenerator};
pub use visualization::ImageGenerator;

use crate::core::error::MindMapError;
use crate::core::models::{MindMapNode, MindMapTheme};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fmt;
use std::str::FromStr;

/// Default generator name written into document metadata
pub const DEFAULT_AUTHOR: &str = "Mindmap Bot";

/// Supported output kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Two-sheet xlsx workbook
    Excel,
    /// Generic JSON tree
    Json,
    /// Markdown heading/bullet outline
    Markdown,
    /// OPML 2.0 outline
    Opml,
    /// FreeMind `.mm` XML
    FreeMind,
    /// PNG radial preview
    Image,
}

impl OutputFormat {
    /// All formats, in menu order
    pub const ALL: [Self; 6] = [
        Self::Excel,
        Self::Json,
        Self::Markdown,
        Self::Opml,
        Self::FreeMind,
        Self::Image,
    ];

    /// Canonical file extension
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Opml => "opml",
            Self::FreeMind => "mm",
            Self::Image => "png",
        }
    }

    /// MIME type of the produced buffer
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Json => "application/json",
            Self::Markdown => "text/markdown",
            Self::Opml => "text/x-opml",
            Self::FreeMind => "application/x-freemind",
            Self::Image => "image/png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MindMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excel" | "xlsx" | "spreadsheet" => Ok(Self::Excel),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "opml" => Ok(Self::Opml),
            "freemind" | "mm" => Ok(Self::FreeMind),
            "image" | "png" => Ok(Self::Image),
            _ => Err(MindMapError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excel => write!(f, "excel"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Opml => write!(f, "opml"),
            Self::FreeMind => write!(f, "freemind"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Authorship and clock settings shared by the metadata-writing formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Name written as author / owner / generator
    pub author: String,
    /// Offset timestamps are rendered in
    pub offset: FixedOffset,
}

impl DocumentMeta {
    /// Create metadata settings; out-of-range offsets fall back to UTC
    #[must_use]
    pub fn new(author: impl Into<String>, utc_offset_hours: i32) -> Self {
        let offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self {
            author: author.into(),
            offset,
        }
    }

    /// Current time in the configured offset
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHOR, 7)
    }
}

/// One output kind: consume a tree, produce a complete buffer
pub trait MindMapGenerator: Send + Sync {
    /// Format produced by this generator
    fn format(&self) -> OutputFormat;

    /// Serialize the tree
    ///
    /// # Errors
    /// Returns an error if the backend fails or a size guard trips; no
    /// partial output is returned in that case.
    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError>;
}
