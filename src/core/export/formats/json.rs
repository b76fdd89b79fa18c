//! Generic JSON generator
//!
//! Emits `{meta, theme, root}` where `root` mirrors the node model field for
//! field, so the tree can be reconstructed from the document.

use crate::core::error::MindMapError;
use crate::core::export::{DocumentMeta, MindMapGenerator, OutputFormat};
use crate::core::models::{MindMapNode, MindMapTheme};
use logger::info;
use serde::{Deserialize, Serialize};

/// Document format version
pub const JSON_FORMAT_VERSION: &str = "1.0";

/// Top-level metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMeta {
    /// Map title
    pub name: String,
    /// Generator name
    pub author: String,
    /// ISO-8601 creation timestamp
    pub created: String,
    /// Document format version
    pub version: String,
}

/// Theme block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonTheme {
    /// Theme name
    pub name: String,
    /// Ordered palette
    #[serde(rename = "colorScheme")]
    pub color_scheme: Vec<String>,
    /// Background color
    pub background: String,
    /// Text color
    pub text: String,
}

impl From<&MindMapTheme> for JsonTheme {
    fn from(theme: &MindMapTheme) -> Self {
        Self {
            name: theme.name.clone(),
            color_scheme: theme.colors.clone(),
            background: theme.background.clone(),
            text: theme.text.clone(),
        }
    }
}

/// Whole JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMindMap {
    /// Metadata
    pub meta: JsonMeta,
    /// Theme
    pub theme: JsonTheme,
    /// Root node dump
    pub root: MindMapNode,
}

impl JsonMindMap {
    /// Parse a previously generated document
    ///
    /// # Errors
    /// Returns `InvalidInput` if the bytes are not a valid document
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MindMapError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Generic JSON generator
#[derive(Debug, Clone, Default)]
pub struct JsonGenerator {
    meta: DocumentMeta,
}

impl JsonGenerator {
    /// Create a generator with the given metadata settings
    #[must_use]
    pub const fn new(meta: DocumentMeta) -> Self {
        Self { meta }
    }

    /// Build the document value without serializing it
    #[must_use]
    pub fn document(
        &self,
        root: &MindMapNode,
        title: &str,
        theme: Option<&MindMapTheme>,
    ) -> JsonMindMap {
        let theme = theme.cloned().unwrap_or_default();
        JsonMindMap {
            meta: JsonMeta {
                name: title.to_string(),
                author: self.meta.author.clone(),
                created: self.meta.now().to_rfc3339(),
                version: JSON_FORMAT_VERSION.to_string(),
            },
            theme: JsonTheme::from(&theme),
            root: root.clone(),
        }
    }
}

impl MindMapGenerator for JsonGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError> {
        let document = self.document(root, title, theme);
        let bytes =
            serde_json::to_vec_pretty(&document).map_err(|e| MindMapError::export("json", e))?;
        info!("Generated JSON mind map '{title}' ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MindMapNode {
        let mut root = MindMapNode::new("Topic");
        root.add_child(MindMapNode::new("A"));
        let mut b = MindMapNode::new("B").with_note("Bé");
        b.add_child(MindMapNode::new("B1"));
        root.add_child(b);
        root
    }

    #[test]
    fn test_top_level_keys() {
        let bytes = JsonGenerator::default()
            .generate(&sample(), "Map", None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["meta"]["name"], "Map");
        assert_eq!(value["meta"]["author"], "Mindmap Bot");
        assert_eq!(value["meta"]["version"], "1.0");
        assert!(value["meta"]["created"].as_str().unwrap().contains('T'));
        assert!(value["theme"]["colorScheme"].is_array());
        assert_eq!(value["theme"]["background"], "#ffffff");
        assert_eq!(value["root"]["children"][1]["children"][0]["name"], "B1");
        assert!(value["root"]["children"][0]["note"].is_null());
    }

    #[test]
    fn test_round_trip_reconstructs_tree() {
        let root = sample();
        let bytes = JsonGenerator::default().generate(&root, "Map", None).unwrap();
        let doc = JsonMindMap::from_slice(&bytes).unwrap();
        assert_eq!(doc.root, root);
    }

    #[test]
    fn test_non_ascii_kept_verbatim() {
        let bytes = JsonGenerator::default()
            .generate(&sample(), "Sơ đồ", None)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Sơ đồ"));
        assert!(text.contains("\"Bé\""));
    }

    #[test]
    fn test_theme_written() {
        let theme = MindMapTheme::named("ocean").unwrap();
        let doc = JsonGenerator::default().document(&sample(), "Map", Some(&theme));
        assert_eq!(doc.theme.name, "ocean");
        assert_eq!(doc.theme.color_scheme[0], "#0284c7");
        assert_eq!(doc.theme.text, "#0c4a6e");
    }
}
