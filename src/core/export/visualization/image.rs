//! PNG preview generator
//!
//! Lays the tree out radially, draws it as an SVG scene (connectors first,
//! then node boxes, title and watermark) and rasterizes the scene with
//! resvg.

use super::fonts::{build_database, FontResolver, ResolvedFont, DEFAULT_FONT_PATHS};
use super::layout::{LayoutSettings, RadialLayout};
use crate::core::error::MindMapError;
use crate::core::export::{MindMapGenerator, OutputFormat, DEFAULT_AUTHOR};
use crate::core::models::{MindMapNode, MindMapTheme, Rgb};
use logger::{debug, info};
use quick_xml::escape::escape;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::fontdb::Database;
use resvg::usvg::{Options, Tree};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Number of points a connector curve is sampled into
pub const CURVE_SAMPLES: usize = 21;
/// Perpendicular bend of a connector, as a fraction of its length
const CURVE_BEND: f64 = 0.12;
const CONNECTOR_WIDTH: f64 = 2.0;
const BOX_RADIUS: f64 = 8.0;
const BOX_STROKE: f64 = 2.0;
/// Average glyph advance relative to the font size
const CHAR_WIDTH_RATIO: f64 = 0.6;

const TITLE_SIZE: u32 = 20;
const TITLE_COLOR: &str = "#333333";
const TITLE_TOP: f64 = 20.0;
const WATERMARK_SIZE: u32 = 12;
const WATERMARK_COLOR: &str = "#b4b4b4";
const WATERMARK_MARGIN_RIGHT: f64 = 20.0;
const WATERMARK_MARGIN_BOTTOM: f64 = 30.0;

/// Image rendering settings
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    /// Layout geometry
    pub layout: LayoutSettings,
    /// Horizontal padding inside a node box (vertical padding is the same total)
    pub node_padding: u32,
    /// Smallest label font size
    pub min_font_size: u32,
    /// Largest label font size
    pub max_font_size: u32,
    /// Labels are cut to this many characters
    pub label_max_chars: usize,
    /// Candidate font files, tried in order
    pub font_paths: Vec<PathBuf>,
    /// Largest allowed canvas side in pixels
    pub max_canvas_dimension: u32,
    /// Also load the fonts installed on the host
    pub system_fonts: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            node_padding: 20,
            min_font_size: 10,
            max_font_size: 24,
            label_max_chars: 50,
            font_paths: DEFAULT_FONT_PATHS.iter().map(PathBuf::from).collect(),
            max_canvas_dimension: 8000,
            system_fonts: true,
        }
    }
}

/// Vector scene ready for rasterization
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// SVG document
    pub svg: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

/// PNG preview generator
#[derive(Debug)]
pub struct ImageGenerator {
    settings: ImageSettings,
    fonts: FontResolver,
    fontdb: OnceLock<Arc<Database>>,
    watermark: String,
}

impl Default for ImageGenerator {
    fn default() -> Self {
        Self::new(ImageSettings::default(), DEFAULT_AUTHOR)
    }
}

impl ImageGenerator {
    /// Create a generator; the watermark credits `author`
    ///
    /// A `max_font_size` below `min_font_size` is raised to it.
    #[must_use]
    pub fn new(mut settings: ImageSettings, author: &str) -> Self {
        settings.max_font_size = settings.max_font_size.max(settings.min_font_size);
        let fonts = FontResolver::new(settings.font_paths.clone());
        Self {
            settings,
            fonts,
            fontdb: OnceLock::new(),
            watermark: format!("Generated by {author}"),
        }
    }

    /// Effective settings
    #[must_use]
    pub const fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Font resolver shared by every render of this generator
    #[must_use]
    pub const fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    /// Font database shared by every render of this generator, built on
    /// first use
    #[must_use]
    pub fn font_database(&self) -> Arc<Database> {
        Arc::clone(self.fontdb.get_or_init(|| {
            let size = self.settings.max_font_size;
            let resolved = [self.fonts.resolve(size, false), self.fonts.resolve(size, true)];
            let db = build_database(&resolved, self.settings.system_fonts);
            debug!("Font database ready with {} faces", db.len());
            Arc::new(db)
        }))
    }

    /// Draw the tree as an SVG scene
    ///
    /// # Errors
    /// Returns `CanvasTooLarge` if the layout needs a canvas wider or taller
    /// than `max_canvas_dimension`.
    pub fn render_scene(
        &self,
        root: &MindMapNode,
        title: &str,
        theme: Option<&MindMapTheme>,
    ) -> Result<Scene, MindMapError> {
        let layout = RadialLayout::compute(root, self.settings.layout);
        let (width, height) = layout.canvas_size();
        debug!("Image layout: {} nodes on {width}x{height}", layout.entries().len());

        let max = self.settings.max_canvas_dimension;
        if width > max || height > max {
            return Err(MindMapError::CanvasTooLarge { width, height, max });
        }

        let (dx, dy) = layout.offset();
        let background = theme.map_or(Rgb::WHITE, |t| Rgb::parse_lenient(&t.background));

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="{background}"/>"#);

        let entries = layout.entries();
        let position = |idx: usize| {
            let p = entries[idx].placement;
            (p.x + dx, p.y + dy)
        };

        svg.push_str("<g fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n");
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(parent) = entry.parent {
                let color = Rgb::parse_lenient(&entry.node.colors.branch);
                let points = curve_points(position(parent), position(idx));
                let _ = writeln!(
                    svg,
                    r#"<polyline points="{}" stroke="{color}" stroke-width="{CONNECTOR_WIDTH}"/>"#,
                    format_points(&points)
                );
            }
        }
        svg.push_str("</g>\n");

        for (idx, entry) in entries.iter().enumerate() {
            self.draw_node(&mut svg, entry.node, position(idx));
        }

        self.draw_title(&mut svg, title, width);
        self.draw_watermark(&mut svg, width, height);
        svg.push_str("</svg>\n");

        Ok(Scene { svg, width, height })
    }

    fn draw_node(&self, svg: &mut String, node: &MindMapNode, (x, y): (f64, f64)) {
        let size = node
            .font
            .size
            .clamp(self.settings.min_font_size, self.settings.max_font_size);
        let font = self.fonts.resolve(size, node.font.is_bold());
        let label: String = node.name.chars().take(self.settings.label_max_chars).collect();

        let (text_w, text_h) = measure_text(&label, size);
        let pad = f64::from(self.settings.node_padding);
        let box_w = 2.0f64.mul_add(pad, text_w);
        let box_h = text_h + pad;

        let fill = Rgb::parse_lenient(&node.colors.background);
        let stroke = Rgb::parse_lenient(&node.colors.branch);
        let text_color = Rgb::parse_lenient(&node.colors.name);

        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{box_w:.2}" height="{box_h:.2}" rx="{BOX_RADIUS}" fill="{fill}" stroke="{stroke}" stroke-width="{BOX_STROKE}"/>"#,
            x - box_w / 2.0,
            y - box_h / 2.0,
        );
        push_text(
            svg,
            &TextStyle {
                x,
                baseline: baseline_for_center(y, size),
                anchor: "middle",
                size,
                bold: node.font.is_bold(),
                italic: node.font.is_italic(),
                color: &text_color.to_string(),
                font: &font,
            },
            &label,
        );
    }

    fn draw_title(&self, svg: &mut String, title: &str, width: u32) {
        let font = self.fonts.resolve(TITLE_SIZE, true);
        push_text(
            svg,
            &TextStyle {
                x: f64::from(width) / 2.0,
                baseline: TITLE_TOP + f64::from(TITLE_SIZE),
                anchor: "middle",
                size: TITLE_SIZE,
                bold: true,
                italic: false,
                color: TITLE_COLOR,
                font: &font,
            },
            title,
        );
    }

    fn draw_watermark(&self, svg: &mut String, width: u32, height: u32) {
        let font = self.fonts.resolve(WATERMARK_SIZE, false);
        let (text_w, _) = measure_text(&self.watermark, WATERMARK_SIZE);
        push_text(
            svg,
            &TextStyle {
                x: f64::from(width) - text_w - WATERMARK_MARGIN_RIGHT,
                baseline: f64::from(height) - WATERMARK_MARGIN_BOTTOM + f64::from(WATERMARK_SIZE),
                anchor: "start",
                size: WATERMARK_SIZE,
                bold: false,
                italic: false,
                color: WATERMARK_COLOR,
                font: &font,
            },
            &self.watermark,
        );
    }

    /// Rasterize a scene to PNG bytes
    ///
    /// # Errors
    /// Returns an `Export` error if the scene cannot be parsed, the pixmap
    /// cannot be allocated or PNG encoding fails.
    pub fn rasterize(&self, scene: &Scene) -> Result<Vec<u8>, MindMapError> {
        let regular = self.fonts.resolve(self.settings.max_font_size, false);
        let options = Options {
            font_family: regular.family.clone(),
            fontdb: self.font_database(),
            ..Options::default()
        };

        let tree = Tree::from_str(&scene.svg, &options)
            .map_err(|e| MindMapError::export("image", format!("invalid scene: {e}")))?;
        let mut pixmap = Pixmap::new(scene.width, scene.height).ok_or_else(|| {
            MindMapError::export(
                "image",
                format!("cannot allocate {}x{} pixmap", scene.width, scene.height),
            )
        })?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| MindMapError::export("image", format!("PNG encoding failed: {e}")))
    }
}

impl MindMapGenerator for ImageGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Image
    }

    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError> {
        let scene = self.render_scene(root, title, theme)?;
        let png = self.rasterize(&scene)?;
        info!(
            "Generated mind map image '{title}': {}x{} ({} bytes)",
            scene.width,
            scene.height,
            png.len()
        );
        Ok(png)
    }
}

struct TextStyle<'a> {
    x: f64,
    baseline: f64,
    anchor: &'a str,
    size: u32,
    bold: bool,
    italic: bool,
    color: &'a str,
    font: &'a ResolvedFont,
}

fn push_text(svg: &mut String, text_style: &TextStyle<'_>, text: &str) {
    let weight = if text_style.bold { "bold" } else { "normal" };
    let style = if text_style.italic { "italic" } else { "normal" };
    let family = format!("'{}', sans-serif", text_style.font.family);
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" font-family="{}" font-size="{}" font-weight="{weight}" font-style="{style}" fill="{}">{}</text>"#,
        text_style.x,
        text_style.baseline,
        text_style.anchor,
        escape(family.as_str()),
        text_style.size,
        text_style.color,
        escape(text)
    );
}

/// Approximate rendered size of a single-line label
#[must_use]
pub fn measure_text(text: &str, size: u32) -> (f64, f64) {
    let size = f64::from(size);
    let chars = text.chars().count() as f64;
    (chars * size * CHAR_WIDTH_RATIO, size)
}

/// Baseline that vertically centers a line of text on `y`
fn baseline_for_center(y: f64, size: u32) -> f64 {
    0.35f64.mul_add(f64::from(size), y)
}

/// Sample the quadratic Bézier between two points
///
/// The control point is the midpoint pushed sideways by a fraction of the
/// segment length, which gives connectors a slight curve.
#[must_use]
pub fn curve_points(start: (f64, f64), end: (f64, f64)) -> Vec<(f64, f64)> {
    let (x1, y1) = start;
    let (x2, y2) = end;
    let (dx, dy) = (x2 - x1, y2 - y1);
    let cx = dy.mul_add(-CURVE_BEND, (x1 + x2) / 2.0);
    let cy = dx.mul_add(CURVE_BEND, (y1 + y2) / 2.0);

    let last = (CURVE_SAMPLES - 1) as f64;
    (0..CURVE_SAMPLES)
        .map(|i| {
            let t = i as f64 / last;
            let u = 1.0 - t;
            (
                u * u * x1 + 2.0 * u * t * cx + t * t * x2,
                u * u * y1 + 2.0 * u * t * cy + t * t * y2,
            )
        })
        .collect()
}

fn format_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_without_fonts() -> ImageSettings {
        ImageSettings {
            font_paths: Vec::new(),
            system_fonts: false,
            ..ImageSettings::default()
        }
    }

    fn sample() -> MindMapNode {
        let mut root = MindMapNode::new("Topic");
        root.add_child(MindMapNode::new("A"));
        let mut b = MindMapNode::new("B & <C>");
        b.add_child(MindMapNode::new("B1"));
        root.add_child(b);
        root
    }

    #[test]
    fn test_curve_endpoints_and_samples() {
        let points = curve_points((0.0, 0.0), (100.0, 0.0));
        assert_eq!(points.len(), CURVE_SAMPLES);
        assert_eq!(points[0], (0.0, 0.0));
        assert!((points[20].0 - 100.0).abs() < 1e-9);
        assert!(points[10].1.abs() > 0.0);
    }

    #[test]
    fn test_scene_structure() {
        let generator = ImageGenerator::new(settings_without_fonts(), "Tester");
        let scene = generator.render_scene(&sample(), "Title", None).unwrap();

        assert_eq!((scene.width, scene.height), (1200, 800));
        assert_eq!(scene.svg.matches("<polyline").count(), 3);
        assert_eq!(scene.svg.matches("rx=\"8\"").count(), 4);
        assert!(scene.svg.contains("B &amp; &lt;C&gt;"));
        assert!(scene.svg.contains("Generated by Tester"));
        assert!(scene.svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn test_labels_truncated() {
        let generator = ImageGenerator::new(settings_without_fonts(), "Tester");
        let root = MindMapNode::new("x".repeat(80));
        let scene = generator.render_scene(&root, "T", None).unwrap();
        assert!(scene.svg.contains(&format!(">{}</text>", "x".repeat(50))));
        assert!(!scene.svg.contains(&"x".repeat(51)));
    }

    #[test]
    fn test_theme_background_used() {
        let generator = ImageGenerator::new(settings_without_fonts(), "Tester");
        let theme = MindMapTheme::named("dark").unwrap();
        let scene = generator.render_scene(&sample(), "T", Some(&theme)).unwrap();
        let expected = Rgb::parse_lenient(&theme.background).to_string();
        assert!(scene.svg.contains(&format!("<rect width=\"100%\" height=\"100%\" fill=\"{expected}\"/>")));
    }

    #[test]
    fn test_canvas_guard() {
        let settings = ImageSettings {
            max_canvas_dimension: 1000,
            ..settings_without_fonts()
        };
        let err = ImageGenerator::new(settings, "Tester")
            .render_scene(&sample(), "T", None)
            .unwrap_err();
        assert!(matches!(
            err,
            MindMapError::CanvasTooLarge {
                width: 1200,
                max: 1000,
                ..
            }
        ));
    }

    #[test]
    fn test_labels_drawn_with_builtin_font() {
        let generator = ImageGenerator::new(settings_without_fonts(), "Tester");
        let png = generator.generate(&sample(), "Title", None).unwrap();
        let pixmap = Pixmap::decode_png(&png).unwrap();

        // Only label, title and watermark text is darker than the blue connectors
        let dark = pixmap
            .pixels()
            .iter()
            .filter(|p| p.alpha() == 255 && p.red() < 80 && p.green() < 80 && p.blue() < 80)
            .count();
        assert!(dark > 50, "expected rendered glyphs, found {dark} dark pixels");
    }

    #[test]
    fn test_font_database_built_once() {
        let generator = ImageGenerator::new(settings_without_fonts(), "Tester");
        let first = generator.font_database();
        generator.generate(&sample(), "Title", None).unwrap();
        assert!(Arc::ptr_eq(&first, &generator.font_database()));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_inverted_font_range_normalized() {
        let settings = ImageSettings {
            min_font_size: 30,
            max_font_size: 12,
            ..settings_without_fonts()
        };
        let mut root = MindMapNode::new("big");
        root.font.size = 14;
        let generator = ImageGenerator::new(settings, "Tester");
        assert_eq!(generator.settings().max_font_size, 30);
        let scene = generator.render_scene(&root, "T", None).unwrap();
        assert!(scene.svg.contains("font-size=\"30\""));
    }

    #[test]
    fn test_png_signature() {
        let generator = ImageGenerator::new(settings_without_fonts(), "Tester");
        let png = generator.generate(&sample(), "Title", None).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
