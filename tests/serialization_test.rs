//! Integration tests for the JSON mirror.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use serde_json::Value;
use unocr::render::{from_json, read_json, to_json, write_json, JsonFormat};
use unocr::{
    analyze, analyze_pages, BoundingBox, MultiPageDocument, PageInput, PageSize,
    StructuredDocument, TextFragment,
};

fn fragment(id: &str, text: &str, x: f32, y: f32, width: f32, height: f32) -> TextFragment {
    TextFragment::new(id, text, BoundingBox::new(x, y, width, height), 0.9)
}

/// A page exercising every structural element type.
fn rich_page() -> Vec<TextFragment> {
    vec![
        fragment("t", "Team Roster", 0.1, 0.92, 0.4, 0.05),
        fragment("h1", "Name", 0.1, 0.85, 0.1, 0.023),
        fragment("h2", "Role", 0.5, 0.85, 0.1, 0.023),
        fragment("r1", "Ana", 0.1, 0.81, 0.1, 0.02),
        fragment("r2", "Lead", 0.5, 0.81, 0.1, 0.02),
        fragment("l1", "- [ ] book room", 0.1, 0.7, 0.3, 0.02),
        fragment("l2", "- [x] send invite", 0.1, 0.67, 0.3, 0.02),
        fragment("p", "Mail ana@example.com with questions.", 0.1, 0.5, 0.7, 0.02),
    ]
}

#[test]
fn test_page_round_trip() {
    let doc = analyze(rich_page(), PageSize::new(1240.0, 1754.0));

    let json = to_json(&doc, JsonFormat::Pretty).unwrap();
    let parsed: StructuredDocument = from_json(&json).unwrap();

    assert_eq!(parsed, doc);
    assert_eq!(parsed.elements().len(), doc.elements().len());
}

#[test]
fn test_stable_keys() {
    let doc = analyze(rich_page(), PageSize::new(1240.0, 1754.0));
    let value: Value = serde_json::from_str(&to_json(&doc, JsonFormat::Compact).unwrap()).unwrap();

    let fragment = &value["textFragments"][0];
    for key in ["id", "text", "boundingBox", "confidence"] {
        assert!(fragment.get(key).is_some(), "missing fragment key {}", key);
    }
    for key in ["x", "y", "width", "height"] {
        assert!(fragment["boundingBox"].get(key).is_some());
    }

    assert_eq!(value["headings"][0]["level"], 1);

    let table = &value["tables"][0];
    assert_eq!(table["columnCount"], 2);
    assert_eq!(table["rows"][0]["isHeader"], true);
    let cell = &table["rows"][1]["cells"][1];
    assert_eq!(cell["text"], "Lead");
    assert_eq!(cell["row"], 1);
    assert_eq!(cell["column"], 1);
    assert_eq!(cell["fragmentIds"][0], "r2");

    let list = &value["lists"][0];
    assert_eq!(list["type"], "checkbox");
    assert_eq!(list["items"][0]["marker"], "[ ]");
    assert_eq!(list["items"][0]["level"], 0);
    assert_eq!(list["items"][1]["checked"], true);

    let link = &value["links"][0];
    assert_eq!(link["type"], "email");
    assert_eq!(link["url"], "mailto:ana@example.com");

    assert!(value["readingOrder"].is_array());
    assert!(value["columns"].is_array());
}

#[test]
fn test_unchecked_state_omitted_for_plain_items() {
    let doc = analyze(
        vec![
            fragment("a", "• one", 0.1, 0.8, 0.3, 0.02),
            fragment("b", "• two", 0.1, 0.77, 0.3, 0.02),
        ],
        PageSize::new(100.0, 100.0),
    );

    let value: Value = serde_json::from_str(&to_json(&doc, JsonFormat::Compact).unwrap()).unwrap();
    assert_eq!(value["lists"][0]["type"], "unordered");
    assert!(value["lists"][0]["items"][0].get("checked").is_none());
}

#[test]
fn test_multi_page_file_round_trip() {
    let pages = vec![
        PageInput::new(PageSize::new(1240.0, 1754.0), rich_page()),
        PageInput::new(
            PageSize::new(1754.0, 1240.0),
            vec![fragment("x", "Appendix", 0.1, 0.5, 0.3, 0.02)],
        ),
    ];
    let doc = analyze_pages(pages);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.json");

    let writer = BufWriter::new(File::create(&path).unwrap());
    write_json(writer, &doc, JsonFormat::Pretty).unwrap();

    let reader = BufReader::new(File::open(&path).unwrap());
    let parsed: MultiPageDocument = read_json(reader).unwrap();

    assert_eq!(parsed, doc);
    assert_eq!(parsed.page_count(), 2);
    assert!(parsed.page(2).unwrap().size.is_landscape());
}

#[test]
fn test_fragment_input_contract() {
    let json = r#"[
        {"id": "1", "text": "hello", "confidence": 0.87,
         "boundingBox": {"x": 0.1, "y": 0.2, "width": 0.3, "height": 0.04}}
    ]"#;

    let fragments: Vec<TextFragment> = from_json(json).unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].bounding_box.max_y(), 0.2 + 0.04);
    assert_eq!(fragments[0].confidence, 0.87);
}
