//! Generation facade
//!
//! Builds the tree from a nested record, picks the generator for the
//! requested format and hands back its buffer unmodified, along with a
//! suggested file name.

use crate::core::builder::{NodeRecord, TreeBuilder, TreeLimits};
use crate::core::config::Config;
use crate::core::error::MindMapError;
use crate::core::export::visualization::ImageSettings;
use crate::core::export::{
    DocumentMeta, ExcelGenerator, FreeMindGenerator, ImageGenerator, JsonGenerator,
    MarkdownGenerator, MindMapGenerator, OpmlGenerator, OutputFormat,
};
use crate::core::models::MindMapTheme;
use logger::{debug, info};

/// File stem used when the title has no usable characters
const FALLBACK_STEM: &str = "mindmap";
/// Longest file stem produced from a title
const MAX_STEM_CHARS: usize = 80;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Complete file contents
    pub bytes: Vec<u8>,
    /// Format of `bytes`
    pub format: OutputFormat,
    /// Suggested file name: sanitized title plus extension
    pub file_name: String,
}

/// Turn a title into a safe file stem
///
/// Letters and digits (any script), `-` and `_` are kept; runs of anything
/// else collapse into a single `_`.
#[must_use]
pub fn sanitize_file_stem(title: &str) -> String {
    let mut stem = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            stem.push(c);
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem: String = stem.trim_matches('_').chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Facade over the tree builder and the six generators
#[derive(Debug, Default)]
pub struct MindMapService {
    limits: TreeLimits,
    excel: ExcelGenerator,
    json: JsonGenerator,
    markdown: MarkdownGenerator,
    opml: OpmlGenerator,
    freemind: FreeMindGenerator,
    image: ImageGenerator,
}

impl MindMapService {
    /// Create a service from explicit settings
    #[must_use]
    pub fn new(limits: TreeLimits, meta: &DocumentMeta, image: ImageSettings) -> Self {
        Self {
            limits,
            excel: ExcelGenerator::new(meta.clone()),
            json: JsonGenerator::new(meta.clone()),
            markdown: MarkdownGenerator::new(),
            opml: OpmlGenerator::new(meta.clone()),
            freemind: FreeMindGenerator::new(),
            image: ImageGenerator::new(image, &meta.author),
        }
    }

    /// Create a service from loaded configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tree_limits(),
            &config.document_meta(),
            config.image_settings(),
        )
    }

    /// Generator for a format
    #[must_use]
    pub fn generator(&self, format: OutputFormat) -> &dyn MindMapGenerator {
        match format {
            OutputFormat::Excel => &self.excel,
            OutputFormat::Json => &self.json,
            OutputFormat::Markdown => &self.markdown,
            OutputFormat::Opml => &self.opml,
            OutputFormat::FreeMind => &self.freemind,
            OutputFormat::Image => &self.image,
        }
    }

    /// Generate one document from a nested record
    ///
    /// `theme` names an entry of the palette table (case-insensitive);
    /// `None` builds an unstyled tree.
    ///
    /// # Errors
    /// Returns `UnknownTheme` for an unrecognized theme name, `TreeTooLarge`
    /// when a size guard trips, or whatever the selected generator reports.
    pub fn generate(
        &self,
        record: &NodeRecord,
        title: &str,
        format: OutputFormat,
        theme: Option<&str>,
    ) -> Result<GeneratedDocument, MindMapError> {
        info!("Generating {format} mind map: {title}");

        let theme = theme
            .map(|name| MindMapTheme::named(name).ok_or_else(|| MindMapError::UnknownTheme(name.to_string())))
            .transpose()?;

        let root = TreeBuilder::new(self.limits)
            .with_theme(theme.clone())
            .build(record)?;
        debug!("Built tree with {} nodes, depth {}", root.node_count(), root.depth());

        let bytes = self.generator(format).generate(&root, title, theme.as_ref())?;

        Ok(GeneratedDocument {
            bytes,
            format,
            file_name: format!("{}.{}", sanitize_file_stem(title), format.extension()),
        })
    }

    /// Parse a JSON record and generate a document from it
    ///
    /// # Errors
    /// Returns `InvalidInput` if the JSON is malformed, otherwise as
    /// [`generate`](Self::generate).
    pub fn generate_from_json(
        &self,
        json: &str,
        title: &str,
        format: OutputFormat,
        theme: Option<&str>,
    ) -> Result<GeneratedDocument, MindMapError> {
        let record = NodeRecord::from_json(json)?;
        self.generate(&record, title, format, theme)
    }
}
