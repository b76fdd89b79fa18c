//! Radial layout
//!
//! The root sits at a fixed center. Each node's children are spread evenly
//! over an angular sector, one level further out, and each child gets a
//! narrower sector of its own for its children:
//!
//! - child `i` of `n` in `[start, end)` sits at `start + (i + 0.5) * step`
//!   where `step = (end - start) / n`
//! - the radius from the parent is `level_spacing * level`
//! - the child's own sector is `min(step * 0.8, π/2)`, centered on its angle
//!
//! Positions are canvas-independent; [`RadialLayout::offset`] translates them
//! so the bounding box sits centered on the canvas.

use crate::core::models::MindMapNode;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Fraction of a parent step handed to each child as its sector
const SECTOR_SHRINK: f64 = 0.8;

/// Geometry settings for the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Minimum canvas width
    pub min_width: u32,
    /// Minimum canvas height
    pub min_height: u32,
    /// Margin kept around the bounding box
    pub padding: u32,
    /// Radius step per level
    pub level_spacing: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_width: 1200,
            min_height: 800,
            padding: 100,
            level_spacing: 180,
        }
    }
}

/// Where one node landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Horizontal position in layout space
    pub x: f64,
    /// Vertical position in layout space
    pub y: f64,
    /// Angle from the parent in radians (0 for the root)
    pub angle: f64,
    /// Depth below the root
    pub level: usize,
}

/// A node together with its placement and its parent's index
#[derive(Debug, Clone, Copy)]
pub struct LaidOutNode<'a> {
    /// The node
    pub node: &'a MindMapNode,
    /// Its position
    pub placement: Placement,
    /// Index of the parent entry, `None` for the root
    pub parent: Option<usize>,
}

/// Axis-aligned bounding box of all placements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x
    pub min_x: f64,
    /// Largest x
    pub max_x: f64,
    /// Smallest y
    pub min_y: f64,
    /// Largest y
    pub max_y: f64,
}

impl Bounds {
    /// Horizontal extent
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Angles for `n` children spread over `[start, end)`
#[must_use]
pub fn child_angles(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = (end - start) / n as f64;
    (0..n).map(|i| (i as f64 + 0.5).mul_add(step, start)).collect()
}

/// Width of the sector a child receives for its own children
#[must_use]
pub fn child_sector(step: f64) -> f64 {
    (step * SECTOR_SHRINK).min(FRAC_PI_2)
}

/// Computed radial layout, entries in pre-order
#[derive(Debug, Clone)]
pub struct RadialLayout<'a> {
    entries: Vec<LaidOutNode<'a>>,
    settings: LayoutSettings,
}

impl<'a> RadialLayout<'a> {
    /// Lay out a whole tree
    #[must_use]
    pub fn compute(root: &'a MindMapNode, settings: LayoutSettings) -> Self {
        let center = Placement {
            x: f64::from(settings.min_width / 2),
            y: f64::from(settings.min_height / 2),
            angle: 0.0,
            level: 0,
        };

        let mut layout = Self {
            entries: Vec::with_capacity(root.node_count()),
            settings,
        };
        layout.entries.push(LaidOutNode {
            node: root,
            placement: center,
            parent: None,
        });
        layout.place_children(0, 0.0, TAU);
        layout
    }

    fn place_children(&mut self, parent_idx: usize, start: f64, end: f64) {
        let parent = self.entries[parent_idx];
        let children = &parent.node.children;
        if children.is_empty() {
            return;
        }

        let level = parent.placement.level + 1;
        let radius = f64::from(self.settings.level_spacing) * level as f64;
        let step = (end - start) / children.len() as f64;
        let sector = child_sector(step);

        for (child, angle) in children.iter().zip(child_angles(start, end, children.len())) {
            let placement = Placement {
                x: radius.mul_add(angle.cos(), parent.placement.x),
                y: radius.mul_add(angle.sin(), parent.placement.y),
                angle,
                level,
            };
            let idx = self.entries.len();
            self.entries.push(LaidOutNode {
                node: child,
                placement,
                parent: Some(parent_idx),
            });
            self.place_children(idx, angle - sector / 2.0, angle + sector / 2.0);
        }
    }

    /// All entries, root first, in pre-order
    #[must_use]
    pub fn entries(&self) -> &[LaidOutNode<'a>] {
        &self.entries
    }

    /// Bounding box of every placement
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let first = self.entries[0].placement;
        self.entries.iter().fold(
            Bounds {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |b, e| Bounds {
                min_x: b.min_x.min(e.placement.x),
                max_x: b.max_x.max(e.placement.x),
                min_y: b.min_y.min(e.placement.y),
                max_y: b.max_y.max(e.placement.y),
            },
        )
    }

    /// Canvas size: bounding box plus padding on each side, floored at the minimum
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn canvas_size(&self) -> (u32, u32) {
        let bounds = self.bounds();
        let pad = 2.0 * f64::from(self.settings.padding);
        let width = (bounds.width() + pad).ceil().min(f64::from(u32::MAX)) as u32;
        let height = (bounds.height() + pad).ceil().min(f64::from(u32::MAX)) as u32;
        (
            width.max(self.settings.min_width),
            height.max(self.settings.min_height),
        )
    }

    /// Translation that centers the bounding box on the canvas
    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        let bounds = self.bounds();
        let (width, height) = self.canvas_size();
        (
            (f64::from(width) - bounds.width()) / 2.0 - bounds.min_x,
            (f64::from(height) - bounds.height()) / 2.0 - bounds.min_y,
        )
    }
}
