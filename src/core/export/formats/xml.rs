//! Thin pretty-printing XML writer shared by the XML dialects

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io;

/// Indentation width for pretty output
const INDENT: usize = 2;

/// Event writer over an in-memory buffer with two-space indentation
pub struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    /// Start a document, optionally with an XML declaration
    ///
    /// # Errors
    /// Returns an error if the declaration cannot be written
    pub fn new(with_declaration: bool) -> io::Result<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
        if with_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        Ok(Self { writer })
    }

    /// Open an element with attributes (values are escaped)
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        let elem = element(name, attrs);
        self.writer.write_event(Event::Start(elem))
    }

    /// Close an element
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn end(&mut self, name: &str) -> io::Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    /// Write a self-closing element
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        let elem = element(name, attrs);
        self.writer.write_event(Event::Empty(elem))
    }

    /// Write `<name>text</name>` on one line
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn text_element(&mut self, name: &str, text: &str) -> io::Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    /// Finish and return the bytes, newline-terminated
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        bytes
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for (key, value) in attrs {
        let value = escape_attribute(value);
        // Raw tuple: the value is already escaped
        elem.push_attribute((key.as_bytes(), value.as_bytes()));
    }
    elem
}

/// Escape an attribute value; tabs and line breaks become character
/// references so they survive attribute-value normalization
fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}
