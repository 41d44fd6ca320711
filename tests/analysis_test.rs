//! End-to-end tests for page analysis.

use std::collections::HashSet;

use unocr::{
    analyze, AnalysisOptions, BoundingBox, ElementKind, LinkType, ListType, PageSize,
    StructureAnalyzer, StructuredDocument, TextFragment,
};

fn fragment(id: &str, text: &str, x: f32, y: f32, width: f32, height: f32) -> TextFragment {
    TextFragment::new(id, text, BoundingBox::new(x, y, width, height), 0.95)
}

fn a4() -> PageSize {
    PageSize::new(1240.0, 1754.0)
}

/// Ids consumed by headings, table cells and list items.
fn consumed_ids(doc: &StructuredDocument) -> HashSet<String> {
    let mut ids = HashSet::new();
    for heading in &doc.headings {
        ids.extend(heading.fragment_ids.iter().cloned());
    }
    for cell in doc.tables.iter().flat_map(|t| t.cells()) {
        ids.extend(cell.fragment_ids.iter().cloned());
    }
    for item in doc.lists.iter().flat_map(|l| l.items.iter()) {
        ids.extend(item.fragment_ids.iter().cloned());
    }
    ids
}

#[test]
fn test_aligned_grid_is_one_table() {
    let fragments = vec![
        fragment("a", "North", 0.1, 0.8, 0.1, 0.02),
        fragment("b", "12", 0.5, 0.8, 0.1, 0.02),
        fragment("c", "South", 0.1, 0.75, 0.1, 0.02),
        fragment("d", "7", 0.5, 0.75, 0.1, 0.02),
    ];

    let doc = analyze(fragments, a4());

    assert_eq!(doc.tables.len(), 1);
    let table = &doc.tables[0];
    assert_eq!(table.column_count, 2);
    assert_eq!(table.row_count(), 2);
    assert!(!table.has_header());
    assert_eq!(table.plain_text(), "North\t12\nSouth\t7");
    assert!(doc.paragraphs.is_empty());
    assert_eq!(doc.elements().len(), 1);
    assert!(doc.elements()[0].is_table());
}

#[test]
fn test_list_followed_by_lone_numbered_item() {
    let fragments = vec![
        fragment("1", "• A", 0.1, 0.8, 0.3, 0.02),
        fragment("2", "• B", 0.1, 0.77, 0.3, 0.02),
        fragment("3", "1. C", 0.1, 0.74, 0.3, 0.02),
    ];

    let doc = analyze(fragments, a4());

    assert_eq!(doc.lists.len(), 1);
    assert_eq!(doc.lists[0].list_type, ListType::Unordered);
    let texts: Vec<&str> = doc.lists[0].items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "B"]);

    // The lone numbered item is not consumed and falls through to a paragraph
    assert_eq!(doc.paragraphs.len(), 1);
    assert_eq!(doc.paragraphs[0].text, "1. C");
}

#[test]
fn test_links_do_not_consume_fragments() {
    let fragments = vec![fragment(
        "f",
        "Contact a@b.com or visit https://x.io",
        0.1,
        0.5,
        0.7,
        0.02,
    )];
    let bbox = fragments[0].bounding_box;

    let doc = analyze(fragments, a4());

    assert_eq!(doc.links.len(), 2);
    assert_eq!(doc.links[0].link_type, LinkType::Email);
    assert_eq!(doc.links[0].url, "mailto:a@b.com");
    assert_eq!(doc.links[1].link_type, LinkType::Url);
    assert_eq!(doc.links[1].url, "https://x.io");
    assert!(doc.links.iter().all(|l| l.bounding_box == bbox));

    assert_eq!(doc.paragraphs.len(), 1);
    assert_eq!(doc.paragraphs[0].fragment_ids, vec!["f"]);
}

#[test]
fn test_two_column_reading_order() {
    let mut fragments = vec![fragment("title", "Field Notes", 0.05, 0.93, 0.3, 0.04)];
    // Every other line is indented so the two columns do not read as a table
    for row in 0..6 {
        let y = 0.85 - row as f32 * 0.03;
        let indent = if row % 2 == 0 { 0.0 } else { 0.03 };
        fragments.push(fragment(
            &format!("l{}", row),
            "left column text",
            0.05 + indent,
            y,
            0.4 - indent,
            0.02,
        ));
        fragments.push(fragment(
            &format!("r{}", row),
            "right column text",
            0.55 + indent,
            y,
            0.4 - indent,
            0.02,
        ));
    }

    let doc = analyze(fragments, a4());

    assert_eq!(doc.columns.len(), 2);
    assert!(doc.tables.is_empty());
    assert_eq!(doc.headings.len(), 1);
    assert_eq!(doc.paragraphs.len(), 2);
    assert!(doc.paragraphs[0].fragment_ids.iter().all(|id| id.starts_with('l')));
    assert!(doc.paragraphs[1].fragment_ids.iter().all(|id| id.starts_with('r')));

    let elements = doc.elements();
    assert_eq!(elements.len(), 3);
    assert!(elements[0].is_heading());
    assert_eq!(elements[1].bounding_box().min_x(), 0.05);
    assert_eq!(elements[2].bounding_box().min_x(), 0.55);
}

#[test]
fn test_heading_levels_follow_height() {
    let mut fragments = vec![
        fragment("h1", "Report", 0.1, 0.92, 0.4, 0.06),
        fragment("h2", "Summary", 0.1, 0.82, 0.3, 0.04),
        fragment("h3", "Details", 0.1, 0.52, 0.3, 0.03),
    ];
    for i in 0..8 {
        fragments.push(fragment(
            &format!("b{}", i),
            "body",
            0.1,
            0.78 - i as f32 * 0.03,
            0.6,
            0.02,
        ));
    }

    let doc = analyze(fragments, a4());

    assert_eq!(doc.headings.len(), 3);
    let mut by_height: Vec<(f32, u8)> = doc
        .headings
        .iter()
        .map(|h| (h.bounding_box.height, h.level))
        .collect();
    by_height.sort_by(|a, b| b.0.total_cmp(&a.0));
    for pair in by_height.windows(2) {
        assert!(pair[0].1 <= pair[1].1);
    }
    assert_eq!(doc.headings[0].level, 1);
}

#[test]
fn test_consumed_set_disjoint_from_paragraphs() {
    let fragments = vec![
        fragment("t", "Inventory", 0.1, 0.92, 0.4, 0.05),
        fragment("c1", "Item", 0.1, 0.85, 0.1, 0.02),
        fragment("c2", "Count", 0.5, 0.85, 0.1, 0.02),
        fragment("c3", "Bolts", 0.1, 0.82, 0.1, 0.02),
        fragment("c4", "40", 0.5, 0.82, 0.1, 0.02),
        fragment("p1", "Stock was counted on Monday.", 0.1, 0.7, 0.7, 0.02),
        fragment("l1", "[x] shelves", 0.1, 0.6, 0.3, 0.02),
        fragment("l2", "[ ] bins", 0.1, 0.57, 0.3, 0.02),
        fragment("p2", "Questions to stock@example.com", 0.1, 0.4, 0.7, 0.02),
    ];
    let all_ids: HashSet<String> = fragments.iter().map(|f| f.id.clone()).collect();

    let doc = analyze(fragments, a4());
    let consumed = consumed_ids(&doc);

    let paragraph_ids: HashSet<String> = doc
        .paragraphs
        .iter()
        .flat_map(|p| p.fragment_ids.iter().cloned())
        .collect();

    assert!(consumed.is_disjoint(&paragraph_ids));
    let covered: HashSet<String> = consumed.union(&paragraph_ids).cloned().collect();
    assert_eq!(covered, all_ids);

    assert_eq!(doc.lists.len(), 1);
    assert_eq!(doc.lists[0].list_type, ListType::Checkbox);
    assert_eq!(doc.lists[0].items[0].checked, Some(true));
    assert_eq!(doc.links.len(), 1);
}

#[test]
fn test_reading_order_covers_every_element() {
    let fragments = vec![
        fragment("t", "Agenda", 0.1, 0.92, 0.4, 0.05),
        fragment("a", "1. Welcome", 0.1, 0.85, 0.4, 0.02),
        fragment("b", "2. Budget", 0.1, 0.82, 0.4, 0.02),
        fragment("p", "Meeting starts at nine.", 0.1, 0.7, 0.6, 0.02),
    ];

    let doc = analyze(fragments, a4());
    let kinds: Vec<ElementKind> = doc.reading_order.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![ElementKind::Heading, ElementKind::List, ElementKind::Paragraph]
    );
    assert_eq!(
        doc.element_count(),
        doc.headings.len() + doc.paragraphs.len() + doc.tables.len() + doc.lists.len()
    );
    assert_eq!(
        doc.plain_text(),
        "Agenda\n\n1. Welcome\n2. Budget\n\nMeeting starts at nine."
    );
}

#[test]
fn test_degenerate_input() {
    let fragments = vec![
        fragment("z", "", 0.5, 0.5, 0.0, 0.0),
        fragment("w", "   ", 0.2, 0.2, 0.0, 0.0),
        fragment("n", "dot", 0.4, 0.4, -0.1, -0.1),
    ];

    let doc = analyze(fragments, a4());
    assert!(doc.headings.is_empty());
    assert!(doc.tables.is_empty());
    assert_eq!(doc.text_fragments.len(), 3);

    let paragraph_ids: usize = doc.paragraphs.iter().map(|p| p.fragment_count()).sum();
    assert_eq!(paragraph_ids, 3);
}

#[test]
fn test_analyzer_is_reusable_and_deterministic() {
    let analyzer = StructureAnalyzer::with_options(AnalysisOptions::new().sequential()).unwrap();
    let fragments = vec![
        fragment("a", "Alpha", 0.1, 0.8, 0.3, 0.02),
        fragment("b", "Beta", 0.5, 0.8, 0.3, 0.02),
        fragment("c", "Gamma", 0.1, 0.6, 0.3, 0.02),
    ];

    let first = analyzer.analyze(fragments.clone(), a4());
    let second = analyzer.analyze(fragments, a4());
    assert_eq!(first, second);
}
