//! Reads generated workbooks back and checks their layout

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use mindmap_export::core::export::formats::excel::{DATA_SHEET, HEADERS, INFO_SHEET};
use mindmap_export::core::export::{DocumentMeta, ExcelGenerator, MindMapGenerator};
use mindmap_export::core::models::MindMapNode;
use std::io::{Cursor, Read};

fn topic() -> MindMapNode {
    let mut root = MindMapNode::new("Topic");
    root.add_child(MindMapNode::new("A").with_note("first"));
    let mut b = MindMapNode::new("B");
    b.add_child(MindMapNode::new("B1"));
    root.add_child(b);
    root
}

fn workbook_bytes() -> Vec<u8> {
    ExcelGenerator::new(DocumentMeta::new("Test Author", 0))
        .generate(&topic(), "Topic Map", None)
        .expect("workbook generation failed")
}

fn text(data: Option<&Data>) -> String {
    match data {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected a string cell, got {other:?}"),
    }
}

#[test]
fn info_sheet_comes_first() {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(workbook_bytes())).unwrap();
    assert_eq!(workbook.sheet_names(), [INFO_SHEET, DATA_SHEET]);

    let info = workbook.worksheet_range(INFO_SHEET).unwrap();
    assert_eq!(text(info.get_value((0, 0))), "Mind Map Title");
    assert_eq!(text(info.get_value((0, 1))), "Topic Map");
    assert_eq!(text(info.get_value((1, 1))), "Test Author");
}

#[test]
fn data_sheet_rows_read_back() {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(workbook_bytes())).unwrap();
    let data = workbook.worksheet_range(DATA_SHEET).unwrap();

    let header: Vec<String> = (0..4).map(|col| text(data.get_value((0, col)))).collect();
    assert_eq!(header, HEADERS);

    let expected = [
        (0.0, "Topic", None, "Topic"),
        (1.0, "  A", Some("first"), "Topic > A"),
        (1.0, "  B", None, "Topic > B"),
        (2.0, "    B1", None, "Topic > B > B1"),
    ];
    for (row, (level, name, note, path)) in (1u32..).zip(expected) {
        assert_eq!(data.get_value((row, 0)), Some(&Data::Float(level)), "row {row}");
        assert_eq!(text(data.get_value((row, 1))), name);
        match note {
            Some(note) => assert_eq!(text(data.get_value((row, 2))), note),
            None => assert!(
                matches!(data.get_value((row, 2)), None | Some(Data::Empty)),
                "row {row} note should be empty"
            ),
        }
        assert_eq!(text(data.get_value((row, 3))), path);
    }
}

#[test]
fn header_row_is_frozen() {
    let mut archive = zip::ZipArchive::new(Cursor::new(workbook_bytes())).unwrap();
    let mut sheet = String::new();
    archive
        .by_name("xl/worksheets/sheet2.xml")
        .unwrap()
        .read_to_string(&mut sheet)
        .unwrap();

    assert!(sheet.contains("state=\"frozen\""));
    assert!(sheet.contains("ySplit=\"1\""));
}
