//! OPML 2.0 outline generator
//!
//! One `<outline>` per node; notes travel in the `_note` attribute, which
//! EdrawMind and most outliners show as the node description.

use super::xml::XmlDocument;
use crate::core::error::MindMapError;
use crate::core::export::{DocumentMeta, MindMapGenerator, OutputFormat};
use crate::core::models::{MindMapNode, MindMapTheme};
use logger::info;
use std::io;

/// RFC-822 date format used by `dateCreated`
pub const OPML_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// OPML generator
#[derive(Debug, Clone, Default)]
pub struct OpmlGenerator {
    meta: DocumentMeta,
}

impl OpmlGenerator {
    /// Create a generator with the given metadata settings
    #[must_use]
    pub const fn new(meta: DocumentMeta) -> Self {
        Self { meta }
    }

    fn write_document(&self, root: &MindMapNode, title: &str) -> io::Result<Vec<u8>> {
        let created = self.meta.now().format(OPML_DATE_FORMAT).to_string();

        let mut doc = XmlDocument::new(true)?;
        doc.start("opml", &[("version", "2.0")])?;

        doc.start("head", &[])?;
        doc.text_element("title", title)?;
        doc.text_element("dateCreated", &created)?;
        doc.text_element("ownerName", &self.meta.author)?;
        doc.end("head")?;

        doc.start("body", &[])?;
        write_outline(&mut doc, root)?;
        doc.end("body")?;

        doc.end("opml")?;
        Ok(doc.finish())
    }
}

fn write_outline(doc: &mut XmlDocument, node: &MindMapNode) -> io::Result<()> {
    let mut attrs = vec![("text", node.name.as_str())];
    if let Some(note) = node.note_text() {
        attrs.push(("_note", note));
    }

    if node.is_leaf() {
        return doc.empty("outline", &attrs);
    }

    doc.start("outline", &attrs)?;
    for child in &node.children {
        write_outline(doc, child)?;
    }
    doc.end("outline")
}

impl MindMapGenerator for OpmlGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Opml
    }

    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        _theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError> {
        let bytes = self
            .write_document(root, title)
            .map_err(|e| MindMapError::export("opml", e))?;
        info!("Generated OPML outline '{title}' ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MindMapNode {
        let mut root = MindMapNode::new("Topic");
        root.add_child(MindMapNode::new("A").with_note("about \"A\" & more"));
        let mut b = MindMapNode::new("B");
        b.add_child(MindMapNode::new("B1"));
        root.add_child(b);
        root
    }

    fn render(root: &MindMapNode) -> String {
        let bytes = OpmlGenerator::new(DocumentMeta::new("Tester", 7))
            .generate(root, "My <Map>", None)
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_head_block() {
        let xml = render(&sample());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<opml version=\"2.0\">"));
        assert!(xml.contains("<title>My &lt;Map&gt;</title>"));
        assert!(xml.contains("<ownerName>Tester</ownerName>"));
        assert!(xml.contains("+0700</dateCreated>"));
    }

    #[test]
    fn test_outline_nesting_and_notes() {
        let xml = render(&sample());
        assert!(xml.contains("\n    <outline text=\"Topic\">"));
        assert!(xml.contains("<outline text=\"A\" _note=\"about &quot;A&quot; &amp; more\"/>"));
        assert!(xml.contains("\n      <outline text=\"B\">\n        <outline text=\"B1\"/>"));
    }

    #[test]
    fn test_multiline_note_round_trips() {
        use quick_xml::events::Event;

        let root = MindMapNode::new("Topic").with_note("line one\nline two");
        let xml = render(&root);
        assert!(xml.contains("_note=\"line one&#10;line two\""));

        let mut reader = quick_xml::Reader::from_str(&xml);
        let note = loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"outline" => {
                    let attr = e.try_get_attribute("_note").unwrap().unwrap();
                    break attr.unescape_value().unwrap().into_owned();
                }
                Event::Eof => panic!("no outline element"),
                _ => {}
            }
        };
        assert_eq!(note, "line one\nline two");
    }

    #[test]
    fn test_absent_note_has_no_attribute() {
        let xml = render(&sample());
        let b1_line = xml.lines().find(|l| l.contains("\"B1\"")).unwrap();
        assert!(!b1_line.contains("_note"));
    }
}
