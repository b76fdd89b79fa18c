//! Build a node tree from a nested outline record
//!
//! Records come from an upstream producer as `{name, note?, children?}` and
//! are trusted only structurally: a missing name becomes an empty label and
//! a blank note is dropped. Size guards bound how much work a single
//! outline can cause downstream.

use crate::core::error::{MindMapError, TreeLimit};
use crate::core::models::{FontWeight, MindMapNode, MindMapTheme};
use serde::{Deserialize, Serialize};

/// Label color used on the themed root box
const THEMED_ROOT_TEXT: &str = "#ffffff";
/// Font size for the themed root
const THEMED_ROOT_FONT_SIZE: u32 = 20;
/// Font size for themed first-level branches
const THEMED_BRANCH_FONT_SIZE: u32 = 16;

/// Nested outline record as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node label (missing → empty string)
    #[serde(default)]
    pub name: String,
    /// Optional annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Nested children (missing → leaf)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    /// Parse a record from JSON text
    ///
    /// # Errors
    /// Returns `InvalidInput` if the text is not a JSON object of the expected shape
    pub fn from_json(json: &str) -> Result<Self, MindMapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value
    ///
    /// # Errors
    /// Returns `InvalidInput` if the value does not have the expected shape
    pub fn from_value(value: serde_json::Value) -> Result<Self, MindMapError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Depth and size guards applied while building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Deepest allowed level (root is level 0)
    pub max_depth: usize,
    /// Largest allowed total node count
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 12,
            max_nodes: 2000,
        }
    }
}

/// Recursive-descent tree builder
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    limits: TreeLimits,
    theme: Option<MindMapTheme>,
}

impl TreeBuilder {
    /// Create a builder with the given guards and no styling
    #[must_use]
    pub const fn new(limits: TreeLimits) -> Self {
        Self {
            limits,
            theme: None,
        }
    }

    /// Style built nodes from a palette
    #[must_use]
    pub fn with_theme(mut self, theme: Option<MindMapTheme>) -> Self {
        self.theme = theme;
        self
    }

    /// Build a tree, one node per record, children in input order
    ///
    /// # Errors
    /// Returns `TreeTooLarge` when the record nests deeper than `max_depth`
    /// or holds more than `max_nodes` records.
    pub fn build(&self, record: &NodeRecord) -> Result<MindMapNode, MindMapError> {
        let mut count = 0;
        self.build_node(record, 0, None, &mut count)
    }

    fn build_node(
        &self,
        record: &NodeRecord,
        level: usize,
        branch_index: Option<usize>,
        count: &mut usize,
    ) -> Result<MindMapNode, MindMapError> {
        if level > self.limits.max_depth {
            return Err(MindMapError::TreeTooLarge {
                limit: TreeLimit::Depth,
                max: self.limits.max_depth,
                actual: level,
            });
        }
        *count += 1;
        if *count > self.limits.max_nodes {
            return Err(MindMapError::TreeTooLarge {
                limit: TreeLimit::Nodes,
                max: self.limits.max_nodes,
                actual: *count,
            });
        }

        let mut node = MindMapNode::new(record.name.clone());
        node.note = record
            .note
            .as_ref()
            .filter(|n| !n.trim().is_empty())
            .cloned();

        if let Some(theme) = &self.theme {
            apply_theme(&mut node, theme, level, branch_index);
        }

        for (idx, child) in record.children.iter().enumerate() {
            // Root children each start a branch; deeper nodes inherit it
            let child_branch = branch_index.or(Some(idx));
            let child_node = self.build_node(child, level + 1, child_branch, count)?;
            node.add_child(child_node);
        }

        Ok(node)
    }
}

fn apply_theme(
    node: &mut MindMapNode,
    theme: &MindMapTheme,
    level: usize,
    branch_index: Option<usize>,
) {
    match (level, branch_index) {
        (0, _) | (_, None) => {
            if let Some(color) = theme.color_for(0) {
                node.colors.background = color.to_string();
                node.colors.branch = color.to_string();
            }
            node.colors.name = THEMED_ROOT_TEXT.to_string();
            node.font.size = THEMED_ROOT_FONT_SIZE;
            node.font.weight = FontWeight::Bold;
        }
        (_, Some(idx)) => {
            if let Some(color) = theme.color_for(idx) {
                node.colors.branch = color.to_string();
            }
            node.colors.name.clone_from(&theme.text);
            node.colors.background.clone_from(&theme.background);
            if level == 1 {
                node.font.size = THEMED_BRANCH_FONT_SIZE;
                node.font.weight = FontWeight::Bold;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> NodeRecord {
        NodeRecord::from_json(json).unwrap()
    }

    #[test]
    fn test_build_preserves_order_and_notes() {
        let rec = record(
            r#"{"name":"Topic","children":[{"name":"A","note":"first"},{"name":"B","children":[{"name":"B1"}]}]}"#,
        );
        let root = TreeBuilder::default().build(&rec).unwrap();

        assert_eq!(root.name, "Topic");
        assert_eq!(root.children[0].name, "A");
        assert_eq!(root.children[0].note.as_deref(), Some("first"));
        assert_eq!(root.children[1].children[0].name, "B1");
        assert!(root.children[1].children[0].is_leaf());
    }

    #[test]
    fn test_missing_name_defaults_to_empty() {
        let rec = record(r#"{"children":[{"note":"orphan"}]}"#);
        let root = TreeBuilder::default().build(&rec).unwrap();
        assert_eq!(root.name, "");
        assert_eq!(root.children[0].name, "");
    }

    #[test]
    fn test_blank_note_dropped() {
        let rec = record(r#"{"name":"x","note":"  "}"#);
        let root = TreeBuilder::default().build(&rec).unwrap();
        assert!(root.note.is_none());
    }

    #[test]
    fn test_depth_guard() {
        let rec = record(r#"{"name":"0","children":[{"name":"1","children":[{"name":"2"}]}]}"#);
        let builder = TreeBuilder::new(TreeLimits {
            max_depth: 1,
            max_nodes: 100,
        });
        let err = builder.build(&rec).unwrap_err();
        assert!(matches!(
            err,
            MindMapError::TreeTooLarge {
                limit: TreeLimit::Depth,
                max: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_node_guard() {
        let rec = record(r#"{"name":"r","children":[{"name":"a"},{"name":"b"},{"name":"c"}]}"#);
        let builder = TreeBuilder::new(TreeLimits {
            max_depth: 10,
            max_nodes: 3,
        });
        assert!(matches!(
            builder.build(&rec),
            Err(MindMapError::TreeTooLarge {
                limit: TreeLimit::Nodes,
                ..
            })
        ));
    }

    #[test]
    fn test_themed_branches_inherit_palette_color() {
        let rec = record(
            r#"{"name":"r","children":[{"name":"a","children":[{"name":"a1"}]},{"name":"b"}]}"#,
        );
        let theme = MindMapTheme::named("professional");
        let root = TreeBuilder::default().with_theme(theme).build(&rec).unwrap();

        assert_eq!(root.colors.background, "#2563eb");
        assert!(root.font.is_bold());
        assert_eq!(root.children[0].colors.branch, "#2563eb");
        assert_eq!(root.children[0].children[0].colors.branch, "#2563eb");
        assert_eq!(root.children[1].colors.branch, "#dc2626");
        assert_eq!(root.children[1].font.size, 16);
        assert_eq!(root.children[0].children[0].font.size, 14);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            NodeRecord::from_json("[1, 2"),
            Err(MindMapError::InvalidInput(_))
        ));
    }
}
