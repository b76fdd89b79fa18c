//! Markdown outline generator
//!
//! Produces the heading-then-bullets dialect read by Markmap, Obsidian and
//! EdrawMind: shallow levels become headings, deeper ones nested bullets.

use crate::core::error::MindMapError;
use crate::core::export::{MindMapGenerator, OutputFormat};
use crate::core::models::{MindMapNode, MindMapTheme};
use logger::info;
use std::fmt::Write;

/// Levels rendered as headings below the title (`##`, `###`)
const HEADING_DEPTH: usize = 2;
/// Indentation per bullet level
const BULLET_INDENT: &str = "  ";

/// Markdown outline generator
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownGenerator;

impl MarkdownGenerator {
    /// Create a new Markdown generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the outline as a string
    #[must_use]
    pub fn render(root: &MindMapNode, title: &str) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "# {}", single_line(title));

        if let Some(note) = root.note_text() {
            output.push('\n');
            push_note_lines(&mut output, "", note);
        }

        for child in &root.children {
            Self::render_node(&mut output, child, 1);
        }

        output
    }

    fn render_node(output: &mut String, node: &MindMapNode, depth: usize) {
        let name = single_line(&node.name);

        if depth <= HEADING_DEPTH {
            let hashes = "#".repeat(depth + 1);
            let _ = writeln!(output, "\n{hashes} {name}");
            if let Some(note) = node.note_text() {
                output.push('\n');
                push_note_lines(output, "", note);
            }
            // Bullet lists need a blank line after the last heading block
            if depth == HEADING_DEPTH && !node.is_leaf() {
                output.push('\n');
            }
        } else {
            let indent = BULLET_INDENT.repeat(depth - HEADING_DEPTH - 1);
            let _ = writeln!(output, "{indent}- {name}");
            if let Some(note) = node.note_text() {
                let note_indent = format!("{indent}{BULLET_INDENT}");
                push_note_lines(output, &note_indent, note);
            }
        }

        for child in &node.children {
            Self::render_node(output, child, depth + 1);
        }
    }
}

impl MindMapGenerator for MarkdownGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        _theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError> {
        let content = Self::render(root, title);
        info!("Generated Markdown outline '{title}' ({} bytes)", content.len());
        Ok(content.into_bytes())
    }
}

/// Collapse a label onto one line so it cannot break the outline structure
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_note_lines(output: &mut String, indent: &str, note: &str) {
    for line in note.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let _ = writeln!(output, "{indent}{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep_tree() -> MindMapNode {
        let mut d4 = MindMapNode::new("Level 4");
        d4.add_child(MindMapNode::new("Level 5"));
        let mut d3 = MindMapNode::new("Level 3").with_note("third note");
        d3.add_child(d4);
        let mut d2 = MindMapNode::new("Level 2").with_note("second note");
        d2.add_child(d3);
        let mut d1 = MindMapNode::new("Level 1");
        d1.add_child(d2);
        let mut root = MindMapNode::new("Root").with_note("root note");
        root.add_child(d1);
        root
    }

    #[test]
    fn test_headings_then_bullets() {
        let md = MarkdownGenerator::render(&deep_tree(), "My Map");
        let expected = "# My Map\n\
                        \n\
                        root note\n\
                        \n\
                        ## Level 1\n\
                        \n\
                        ### Level 2\n\
                        \n\
                        second note\n\
                        \n\
                        - Level 3\n  third note\n  - Level 4\n    - Level 5\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_root_name_not_repeated() {
        let md = MarkdownGenerator::render(&MindMapNode::new("Root"), "Title");
        assert_eq!(md, "# Title\n");
    }

    #[test]
    fn test_multiline_note_indentation() {
        let d3 = MindMapNode::new("Leaf").with_note("line one\nline two");
        let mut d2 = MindMapNode::new("D2");
        d2.add_child(d3);
        let mut d1 = MindMapNode::new("D1");
        d1.add_child(d2);
        let mut root = MindMapNode::new("R");
        root.add_child(d1);

        let md = MarkdownGenerator::render(&root, "T");
        assert!(md.contains("- Leaf\n  line one\n  line two\n"));
    }

    #[test]
    fn test_newlines_in_names_flattened() {
        let mut root = MindMapNode::new("R");
        root.add_child(MindMapNode::new("two\nlines"));
        let md = MarkdownGenerator::render(&root, "T");
        assert!(md.contains("## two lines\n"));
    }
}
