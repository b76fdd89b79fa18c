//! Radial layout properties over whole trees

use mindmap_export::core::export::visualization::layout::child_sector;
use mindmap_export::core::export::visualization::{LayoutSettings, RadialLayout};
use mindmap_export::core::models::MindMapNode;
use std::f64::consts::{PI, TAU};

const EPS: f64 = 1e-9;

fn fan(width: usize, depth: usize) -> MindMapNode {
    let mut node = MindMapNode::new(format!("d{depth}"));
    if depth > 0 {
        for i in 0..width {
            let mut child = fan(width, depth - 1);
            child.name = format!("{}-{i}", child.name);
            node.add_child(child);
        }
    }
    node
}

#[test]
fn every_node_is_placed_once_in_preorder() {
    let root = fan(3, 3);
    let layout = RadialLayout::compute(&root, LayoutSettings::default());
    let entries = layout.entries();

    assert_eq!(entries.len(), root.node_count());
    assert!(entries[0].parent.is_none());
    for (idx, entry) in entries.iter().enumerate().skip(1) {
        let parent = entry.parent.expect("non-root has a parent");
        assert!(parent < idx);
        assert_eq!(entry.placement.level, entries[parent].placement.level + 1);
    }
}

#[test]
fn siblings_have_increasing_angles() {
    let root = fan(5, 2);
    let layout = RadialLayout::compute(&root, LayoutSettings::default());

    let root_children: Vec<f64> = layout
        .entries()
        .iter()
        .filter(|e| e.parent == Some(0))
        .map(|e| e.placement.angle)
        .collect();
    assert_eq!(root_children.len(), 5);
    assert!(root_children.windows(2).all(|w| w[0] < w[1]));
}

/// Expected `(angle, sector)` for every entry, derived from the parent sectors
fn expected_sectors(layout: &RadialLayout) -> Vec<(f64, (f64, f64))> {
    let entries = layout.entries();
    let mut expected = vec![(0.0, (0.0, TAU))];
    let mut seen = vec![0usize; entries.len()];

    for entry in &entries[1..] {
        let parent = entry.parent.unwrap();
        let (start, end) = expected[parent].1;
        let n = entries[parent].node.children.len() as f64;
        let i = seen[parent] as f64;
        seen[parent] += 1;

        let step = (end - start) / n;
        let angle = start + (i + 0.5) * step;
        let half = child_sector(step) / 2.0;
        expected.push((angle, (angle - half, angle + half)));
    }
    expected
}

#[test]
fn deeper_siblings_stay_inside_parent_sector() {
    let mut root = fan(3, 3);
    // Uneven widths below the first branch
    root.children[0].children[1].add_child(MindMapNode::new("extra"));
    let layout = RadialLayout::compute(&root, LayoutSettings::default());
    let entries = layout.entries();
    let expected = expected_sectors(&layout);

    for (idx, entry) in entries.iter().enumerate().skip(1) {
        let (angle, _) = expected[idx];
        assert!((entry.placement.angle - angle).abs() < EPS, "{}", entry.node.name);

        let (start, end) = expected[entry.parent.unwrap()].1;
        assert!(entry.placement.angle > start && entry.placement.angle < end);
    }

    for parent in 0..entries.len() {
        let angles: Vec<f64> = entries
            .iter()
            .filter(|e| e.parent == Some(parent))
            .map(|e| e.placement.angle)
            .collect();
        assert!(angles.windows(2).all(|w| w[0] < w[1]), "children of {parent}");
    }
}

#[test]
fn only_child_sits_at_sector_midpoint() {
    let mut root = fan(2, 1);
    root.children[1].add_child(MindMapNode::new("only"));
    let layout = RadialLayout::compute(&root, LayoutSettings::default());
    let entries = layout.entries();

    let only = entries.iter().find(|e| e.node.name == "only").unwrap();
    let parent = entries[only.parent.unwrap()].placement.angle;
    assert!((only.placement.angle - parent).abs() < EPS);
}

#[test]
fn chain_of_only_children_keeps_one_direction() {
    let mut root = MindMapNode::new("c0");
    let mut tip = &mut root;
    for depth in 1..=5 {
        tip.add_child(MindMapNode::new(format!("c{depth}")));
        tip = &mut tip.children[0];
    }

    let layout = RadialLayout::compute(&root, LayoutSettings::default());
    let entries = layout.entries();
    assert_eq!(entries.len(), 6);
    for entry in &entries[1..] {
        assert!((entry.placement.angle - PI).abs() < EPS, "{}", entry.node.name);
    }
}

#[test]
fn radius_grows_with_level() {
    let settings = LayoutSettings::default();
    let root = fan(2, 2);
    let layout = RadialLayout::compute(&root, settings);
    let entries = layout.entries();

    for entry in &entries[1..] {
        let parent = entries[entry.parent.unwrap()].placement;
        let dx = entry.placement.x - parent.x;
        let dy = entry.placement.y - parent.y;
        let expected = f64::from(settings.level_spacing) * entry.placement.level as f64;
        assert!((dx.hypot(dy) - expected).abs() < 1e-6);
    }
}

#[test]
fn single_node_uses_minimum_canvas() {
    let root = MindMapNode::new("alone");
    let settings = LayoutSettings::default();
    let layout = RadialLayout::compute(&root, settings);
    assert_eq!(layout.canvas_size(), (settings.min_width, settings.min_height));
}

#[test]
fn large_tree_keeps_padding_on_every_side() {
    let settings = LayoutSettings {
        min_width: 200,
        min_height: 200,
        padding: 50,
        level_spacing: 300,
    };
    let root = fan(4, 3);
    let layout = RadialLayout::compute(&root, settings);
    let (width, height) = layout.canvas_size();
    let (dx, dy) = layout.offset();
    let pad = f64::from(settings.padding);

    for entry in layout.entries() {
        let x = entry.placement.x + dx;
        let y = entry.placement.y + dy;
        assert!(x >= pad - 1e-6 && x <= f64::from(width) - pad + 1e-6);
        assert!(y >= pad - 1e-6 && y <= f64::from(height) - pad + 1e-6);
    }
}
