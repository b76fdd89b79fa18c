//! FreeMind `.mm` generator
//!
//! Readable by FreeMind, Freeplane, XMind and EdrawMind. The root's children
//! alternate right/left; every deeper node stays on its ancestor's side.

use super::xml::XmlDocument;
use crate::core::error::MindMapError;
use crate::core::export::{MindMapGenerator, OutputFormat};
use crate::core::models::{MindMapNode, MindMapTheme};
use logger::info;
use std::fmt;
use std::io;

/// `<map version>` written at the top
pub const FREEMIND_VERSION: &str = "0.9.0";
/// Font family written on every node
const FONT_NAME: &str = "Arial";

/// Side of the root a branch grows on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Right of the root
    Right,
    /// Left of the root
    Left,
}

impl Position {
    /// Side for the root child at `index`
    #[must_use]
    pub const fn for_root_child(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FreeMind XML generator
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeMindGenerator;

impl FreeMindGenerator {
    /// Create a new FreeMind generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn write_document(root: &MindMapNode) -> io::Result<Vec<u8>> {
        let mut doc = XmlDocument::new(true)?;
        doc.start("map", &[("version", FREEMIND_VERSION)])?;
        write_node(&mut doc, root, None)?;
        doc.end("map")?;
        Ok(doc.finish())
    }
}

/// Write one `<node>`; `position` is `None` only for the root
fn write_node(doc: &mut XmlDocument, node: &MindMapNode, position: Option<Position>) -> io::Result<()> {
    let is_root = position.is_none();

    let mut attrs = vec![
        ("TEXT", node.name.as_str()),
        ("COLOR", node.colors.name.as_str()),
    ];
    if !is_white(&node.colors.background) {
        attrs.push(("BACKGROUND_COLOR", node.colors.background.as_str()));
    }
    match position {
        Some(side) => attrs.push(("POSITION", side.as_str())),
        None => attrs.push(("STYLE", "bubble")),
    }
    doc.start("node", &attrs)?;

    let mut edge = vec![("COLOR", node.colors.branch.as_str())];
    if is_root {
        edge.push(("WIDTH", "2"));
    }
    doc.empty("edge", &edge)?;

    let size = node.font.size.to_string();
    let mut font = vec![("NAME", FONT_NAME), ("SIZE", size.as_str())];
    if node.font.is_bold() {
        font.push(("BOLD", "true"));
    }
    if node.font.is_italic() {
        font.push(("ITALIC", "true"));
    }
    doc.empty("font", &font)?;

    if let Some(note) = node.note_text() {
        doc.start("richcontent", &[("TYPE", "NOTE")])?;
        doc.start("html", &[])?;
        doc.start("body", &[])?;
        doc.text_element("p", note)?;
        doc.end("body")?;
        doc.end("html")?;
        doc.end("richcontent")?;
    }

    for (idx, child) in node.children.iter().enumerate() {
        let side = position.unwrap_or_else(|| Position::for_root_child(idx));
        write_node(doc, child, Some(side))?;
    }

    doc.end("node")
}

/// Whether a color string means white: unset, or literally `#ffffff` in any case
fn is_white(color: &str) -> bool {
    let color = color.trim();
    color.is_empty() || color.eq_ignore_ascii_case("#ffffff")
}

impl MindMapGenerator for FreeMindGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::FreeMind
    }

    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        _theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError> {
        let bytes = Self::write_document(root).map_err(|e| MindMapError::export("freemind", e))?;
        info!("Generated FreeMind map '{title}' ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::FontWeight;

    fn render(root: &MindMapNode) -> String {
        let bytes = FreeMindGenerator::new().generate(root, "t", None).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    fn node_line<'a>(xml: &'a str, text: &str) -> &'a str {
        let needle = format!("<node TEXT=\"{text}\"");
        xml.lines().find(|l| l.contains(&needle)).unwrap()
    }

    #[test]
    fn test_topic_scenario() {
        let mut root = MindMapNode::new("Topic");
        root.add_child(MindMapNode::new("A"));
        let mut b = MindMapNode::new("B");
        b.add_child(MindMapNode::new("B1"));
        root.add_child(b);

        let xml = render(&root);
        assert!(xml.contains("<map version=\"0.9.0\">"));

        let topic = node_line(&xml, "Topic");
        assert!(topic.contains("STYLE=\"bubble\""));
        assert!(!topic.contains("POSITION"));
        assert!(node_line(&xml, "A").contains("POSITION=\"right\""));
        assert!(node_line(&xml, "B").contains("POSITION=\"left\""));
        assert!(node_line(&xml, "B1").contains("POSITION=\"left\""));

        assert!(xml.contains("<edge COLOR=\"#1f77b4\" WIDTH=\"2\"/>"));
        assert_eq!(xml.matches("WIDTH=").count(), 1);
        assert!(!xml.contains("richcontent"));
    }

    #[test]
    fn test_positions_alternate_by_parity() {
        let mut root = MindMapNode::new("r");
        for name in ["c0", "c1", "c2", "c3"] {
            let mut child = MindMapNode::new(name);
            child.add_child(MindMapNode::new(format!("{name}-x")));
            root.add_child(child);
        }
        let xml = render(&root);
        assert!(node_line(&xml, "c2").contains("POSITION=\"right\""));
        assert!(node_line(&xml, "c3").contains("POSITION=\"left\""));
        assert!(node_line(&xml, "c3-x").contains("POSITION=\"left\""));
        assert!(node_line(&xml, "c0-x").contains("POSITION=\"right\""));
    }

    #[test]
    fn test_background_only_when_not_white() {
        let mut root = MindMapNode::new("r");
        root.colors.background = "#FFFFFF".to_string();
        let mut tinted = MindMapNode::new("tinted");
        tinted.colors.background = "#2563eb".to_string();
        root.add_child(tinted);

        let xml = render(&root);
        assert!(!node_line(&xml, "r").contains("BACKGROUND_COLOR"));
        assert!(node_line(&xml, "tinted").contains("BACKGROUND_COLOR=\"#2563eb\""));
    }

    #[test]
    fn test_white_matched_as_literal_string() {
        let mut root = MindMapNode::new("r");
        for (name, color) in [("short", "#fff"), ("alpha", "#ffffffff"), ("upper", " #FFFFFF ")] {
            let mut child = MindMapNode::new(name);
            child.colors.background = color.to_string();
            root.add_child(child);
        }

        let xml = render(&root);
        assert!(node_line(&xml, "short").contains("BACKGROUND_COLOR=\"#fff\""));
        assert!(node_line(&xml, "alpha").contains("BACKGROUND_COLOR=\"#ffffffff\""));
        assert!(!node_line(&xml, "upper").contains("BACKGROUND_COLOR"));
    }

    #[test]
    fn test_font_and_note() {
        let mut root = MindMapNode::new("r").with_note("see <here>");
        root.font.weight = FontWeight::Bold;
        root.font.size = 20;

        let xml = render(&root);
        assert!(xml.contains("<font NAME=\"Arial\" SIZE=\"20\" BOLD=\"true\"/>"));
        assert!(xml.contains("<richcontent TYPE=\"NOTE\">"));
        assert!(xml.contains("<p>see &lt;here&gt;</p>"));
    }
}
