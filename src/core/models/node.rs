//! Mind-map node model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default label color
pub const DEFAULT_NAME_COLOR: &str = "#000000";
/// Default node background color
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
/// Default connector color
pub const DEFAULT_BRANCH_COLOR: &str = "#1f77b4";
/// Default font size in points
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Per-node colors, each a hex color string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColors {
    /// Label color
    #[serde(default = "default_name_color")]
    pub name: String,
    /// Box fill color
    #[serde(default = "default_background_color")]
    pub background: String,
    /// Connector color (edge from the parent to this node)
    #[serde(default = "default_branch_color")]
    pub branch: String,
}

fn default_name_color() -> String {
    DEFAULT_NAME_COLOR.to_string()
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_branch_color() -> String {
    DEFAULT_BRANCH_COLOR.to_string()
}

impl Default for NodeColors {
    fn default() -> Self {
        Self {
            name: default_name_color(),
            background: default_background_color(),
            branch: default_branch_color(),
        }
    }
}

/// Font slant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright
    #[default]
    Normal,
    /// Slanted
    Italic,
}

/// Font weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Per-node font settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFont {
    /// Point size
    #[serde(default = "default_font_size")]
    pub size: u32,
    /// Slant
    #[serde(default)]
    pub style: FontStyle,
    /// Weight
    #[serde(default)]
    pub weight: FontWeight,
}

const fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl NodeFont {
    /// Whether the weight is bold
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    /// Whether the style is italic
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.style == FontStyle::Italic
    }
}

impl Default for NodeFont {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
        }
    }
}

/// One labeled entry of the outline tree
///
/// Each node exclusively owns its children, so a built tree is a plain value
/// with no back-pointers. Generators only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    /// Identifier, unique within one generation run
    #[serde(default = "new_node_id")]
    pub id: String,

    /// Display label
    #[serde(default)]
    pub name: String,

    /// Optional free-text annotation
    #[serde(default)]
    pub note: Option<String>,

    /// Label, fill and connector colors
    #[serde(default)]
    pub colors: NodeColors,

    /// Font settings
    #[serde(default)]
    pub font: NodeFont,

    /// Ordered child nodes
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

fn new_node_id() -> String {
    Uuid::new_v4().to_string()
}

impl MindMapNode {
    /// Create a leaf node with default styling and a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_node_id(),
            name: name.into(),
            note: None,
            colors: NodeColors::default(),
            font: NodeFont::default(),
            children: Vec::new(),
        }
    }

    /// Attach a note (builder style)
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Append a child, preserving insertion order
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// The note, if present and not blank
    #[must_use]
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Whether this node has no children
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth of the deepest node below `self` (a leaf has depth 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        let indent = "  ".repeat(level);
        match self.note_text() {
            Some(note) => writeln!(f, "{indent}{} ({note})", self.name)?,
            None => writeln!(f, "{indent}{}", self.name)?,
        }
        for child in &self.children {
            child.fmt_indented(f, level + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for MindMapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
