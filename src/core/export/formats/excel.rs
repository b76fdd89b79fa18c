//! Spreadsheet (xlsx) generator
//!
//! Flattens the tree into one row per node, pre-order, so non-technical
//! users can edit the outline in a spreadsheet:
//!
//! | Level | Node Name   | Note | Path                |
//! |-------|-------------|------|---------------------|
//! | 0     | Root        | ...  | Root                |
//! | 1     | `  `Branch  | ...  | Root > Branch       |
//!
//! An `Info` sheet with metadata and usage notes comes first.

use crate::core::error::MindMapError;
use crate::core::export::{DocumentMeta, MindMapGenerator, OutputFormat};
use crate::core::models::{MindMapNode, MindMapTheme};
use logger::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

/// Data sheet name
pub const DATA_SHEET: &str = "Mind Map";
/// Metadata sheet name
pub const INFO_SHEET: &str = "Info";
/// Data sheet column headers
pub const HEADERS: [&str; 4] = ["Level", "Node Name", "Note", "Path"];
/// Separator between ancestor names in the `Path` column
pub const PATH_SEPARATOR: &str = " > ";

/// Level fill colors, indexed by `min(level, 4)`
const LEVEL_COLORS: [u32; 5] = [0x4472C4, 0x70AD47, 0xFFC000, 0x5B9BD5, 0xA5A5A5];
const HEADER_FILL: u32 = 0x366092;
const PATH_COLOR: u32 = 0x666666;
const DATA_WIDTHS: [f64; 4] = [8.0, 40.0, 50.0, 60.0];
const INFO_WIDTHS: [f64; 2] = [20.0, 60.0];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const USAGE_FIRST_ROW: u32 = 5;

const USAGE_NOTES: [&str; 6] = [
    "How to use:",
    "1. Edit 'Node Name' and 'Note' columns directly",
    "2. Add new rows to add nodes (maintain Level structure)",
    "3. Delete rows to remove nodes",
    "4. Keep Level column consistent (0=Root, 1=Branch, 2=Sub-branch, etc.)",
    "5. Save and use for reference or import back to EdrawMind",
];

/// One flattened data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    /// Depth below the root
    pub level: usize,
    /// Name prefixed with two spaces per level
    pub name: String,
    /// Note text, empty when absent
    pub note: String,
    /// Ancestor names joined by `" > "`, ending with this node
    pub path: String,
}

/// Flatten a tree into rows, pre-order
#[must_use]
pub fn collect_rows(root: &MindMapNode) -> Vec<OutlineRow> {
    let mut rows = Vec::with_capacity(root.node_count());
    push_rows(&mut rows, root, 0, root.name.clone());
    rows
}

fn push_rows(rows: &mut Vec<OutlineRow>, node: &MindMapNode, level: usize, path: String) {
    rows.push(OutlineRow {
        level,
        name: format!("{}{}", "  ".repeat(level), node.name),
        note: node.note_text().unwrap_or_default().to_string(),
        path: path.clone(),
    });
    for child in &node.children {
        let child_path = format!("{path}{PATH_SEPARATOR}{}", child.name);
        push_rows(rows, child, level + 1, child_path);
    }
}

/// Fill color for a level; deeper levels reuse the last color
#[must_use]
pub fn level_color(level: usize) -> u32 {
    LEVEL_COLORS[level.min(LEVEL_COLORS.len() - 1)]
}

/// Spreadsheet generator
#[derive(Debug, Clone, Default)]
pub struct ExcelGenerator {
    meta: DocumentMeta,
}

impl ExcelGenerator {
    /// Create a generator with the given metadata settings
    #[must_use]
    pub const fn new(meta: DocumentMeta) -> Self {
        Self { meta }
    }

    fn build_workbook(&self, root: &MindMapNode, title: &str) -> Result<(Vec<u8>, usize), XlsxError> {
        let mut workbook = Workbook::new();

        let info_sheet = workbook.add_worksheet();
        self.write_info_sheet(info_sheet, title)?;

        let rows = collect_rows(root);
        let data_sheet = workbook.add_worksheet();
        write_data_sheet(data_sheet, &rows)?;

        Ok((workbook.save_to_buffer()?, rows.len()))
    }

    fn write_info_sheet(&self, sheet: &mut Worksheet, title: &str) -> Result<(), XlsxError> {
        sheet.set_name(INFO_SHEET)?;
        let bold = Format::new().set_bold();
        let generated_at = self.meta.now().format(TIMESTAMP_FORMAT).to_string();

        let metadata = [
            ("Mind Map Title", title),
            ("Generated By", self.meta.author.as_str()),
            ("Generated At", generated_at.as_str()),
            ("Format", "Excel (.xlsx)"),
        ];
        for (row, (label, value)) in (0u32..).zip(metadata) {
            sheet.write_string_with_format(row, 0, label, &bold)?;
            sheet.write_string(row, 1, value)?;
        }

        // Row 4 stays blank
        for (row, note) in (USAGE_FIRST_ROW..).zip(USAGE_NOTES) {
            sheet.write_string(row, 0, note)?;
        }

        for (col, width) in (0u16..).zip(INFO_WIDTHS) {
            sheet.set_column_width(col, width)?;
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn write_data_sheet(sheet: &mut Worksheet, rows: &[OutlineRow]) -> Result<(), XlsxError> {
    sheet.set_name(DATA_SHEET)?;

    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_font_size(12)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border_bottom(FormatBorder::Medium);
    for (col, text) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, text, &header)?;
    }

    let root_name = Format::new().set_bold().set_font_size(11);
    let child_name = Format::new().set_font_size(10);
    let note = Format::new().set_text_wrap();
    let path = Format::new()
        .set_font_size(9)
        .set_font_color(Color::RGB(PATH_COLOR));

    for (row, entry) in (1u32..).zip(rows) {
        let level = Format::new()
            .set_align(FormatAlign::Center)
            .set_background_color(Color::RGB(level_color(entry.level)));
        sheet.write_number_with_format(row, 0, entry.level as f64, &level)?;

        let name_format = if entry.level == 0 { &root_name } else { &child_name };
        sheet.write_string_with_format(row, 1, &entry.name, name_format)?;

        if entry.note.is_empty() {
            sheet.write_blank(row, 2, &note)?;
        } else {
            sheet.write_string_with_format(row, 2, &entry.note, &note)?;
        }

        sheet.write_string_with_format(row, 3, &entry.path, &path)?;
    }

    for (col, width) in (0u16..).zip(DATA_WIDTHS) {
        sheet.set_column_width(col, width)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

impl MindMapGenerator for ExcelGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Excel
    }

    fn generate(
        &self,
        root: &MindMapNode,
        title: &str,
        _theme: Option<&MindMapTheme>,
    ) -> Result<Vec<u8>, MindMapError> {
        let (bytes, count) = self
            .build_workbook(root, title)
            .map_err(|e| MindMapError::export("excel", e))?;
        info!("Generated Excel workbook '{title}' ({count} nodes, {} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MindMapNode {
        let mut root = MindMapNode::new("Topic");
        root.add_child(MindMapNode::new("A").with_note("first"));
        let mut b = MindMapNode::new("B");
        b.add_child(MindMapNode::new("B1"));
        root.add_child(b);
        root
    }

    #[test]
    fn test_rows_pre_order() {
        let rows = collect_rows(&sample());
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Topic", "  A", "  B", "    B1"]);
        assert_eq!(rows[3].path, "Topic > B > B1");
        assert_eq!(rows[1].note, "first");
        assert_eq!(rows[2].note, "");
    }

    #[test]
    fn test_level_matches_path_depth() {
        let mut deep = MindMapNode::new("L5");
        deep.add_child(MindMapNode::new("L6"));
        let mut root = sample();
        root.children[1].children[0].add_child(deep);

        for row in collect_rows(&root) {
            let ancestors = row.path.matches(PATH_SEPARATOR).count();
            assert_eq!(row.level, ancestors);
            assert!(row.name.starts_with(&"  ".repeat(row.level)));
        }
    }

    #[test]
    fn test_level_colors_clamp() {
        assert_eq!(level_color(0), 0x4472C4);
        assert_eq!(level_color(4), 0xA5A5A5);
        assert_eq!(level_color(9), 0xA5A5A5);
    }

    #[test]
    fn test_generates_zip_container() {
        let bytes = ExcelGenerator::default()
            .generate(&sample(), "Map", None)
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
