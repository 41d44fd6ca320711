//! # unocr
//!
//! Document structure reconstruction from OCR output.
//!
//! A text-recognition engine produces flat, positioned text fragments. This
//! library turns one page of fragments into a structured document: headings
//! with levels, paragraphs, tables, lists, links, detected columns and a
//! reading order over all of it.
//!
//! ## Quick Start
//!
//! ```
//! use unocr::{analyze, BoundingBox, PageSize, TextFragment};
//!
//! let fragments = vec![
//!     TextFragment::new("1", "Invoice", BoundingBox::new(0.1, 0.9, 0.3, 0.05), 0.99),
//!     TextFragment::new("2", "Item", BoundingBox::new(0.1, 0.8, 0.1, 0.02), 0.97),
//!     TextFragment::new("3", "Price", BoundingBox::new(0.6, 0.8, 0.1, 0.02), 0.97),
//!     TextFragment::new("4", "Pen", BoundingBox::new(0.1, 0.75, 0.1, 0.02), 0.97),
//!     TextFragment::new("5", "2.50", BoundingBox::new(0.6, 0.75, 0.1, 0.02), 0.97),
//! ];
//!
//! let doc = analyze(fragments, PageSize::new(1240.0, 1754.0));
//! assert_eq!(doc.headings[0].text, "Invoice");
//! assert_eq!(doc.tables.len(), 1);
//! assert_eq!(doc.tables[0].column_count, 2);
//! ```
//!
//! ## Features
//!
//! - **Layout analysis**: lines, gutter-based columns, height statistics
//! - **Headings**: levels from relative fragment height
//! - **Tables**: runs of aligned lines, no ruling lines needed
//! - **Lists**: bullet, numbered and checkbox markers
//! - **Links**: URLs, email addresses, phone numbers, file paths
//! - **Parallel processing**: Uses Rayon for detectors and multi-page documents
//! - **JSON mirror**: round-trippable output for downstream renderers

pub mod analysis;
pub mod error;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use analysis::{
    AnalysisOptions, HeadingConfig, LayoutConfig, LinkConfig, ListConfig, StructureAnalyzer,
    TableDetectorConfig,
};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Column, Element, ElementKind, ElementRef, FragmentId, Heading, Link, LinkType,
    List, ListItem, ListType, MultiPageDocument, PageSize, Paragraph, StructuredDocument, Table,
    TableCell, TableRow, TextFragment,
};
pub use render::JsonFormat;
pub use source::{FragmentSource, PageInput};

/// Analyze one page of fragments with default options.
///
/// # Example
///
/// ```
/// use unocr::{analyze, PageSize};
///
/// let doc = analyze(vec![], PageSize::new(800.0, 600.0));
/// assert!(doc.is_empty());
/// ```
pub fn analyze(fragments: Vec<TextFragment>, size: PageSize) -> StructuredDocument {
    StructureAnalyzer::new().analyze(fragments, size)
}

/// Analyze one page of fragments with custom options.
///
/// # Example
///
/// ```
/// use unocr::{analyze_with_options, AnalysisOptions, PageSize};
///
/// let options = AnalysisOptions::new()
///     .with_link_pattern("ticket", r"\bJIRA-\d+\b")
///     .sequential();
/// let doc = analyze_with_options(vec![], PageSize::new(800.0, 600.0), options)?;
/// assert!(doc.links.is_empty());
/// # Ok::<(), unocr::Error>(())
/// ```
pub fn analyze_with_options(
    fragments: Vec<TextFragment>,
    size: PageSize,
    options: AnalysisOptions,
) -> Result<StructuredDocument> {
    let analyzer = StructureAnalyzer::with_options(options)?;
    Ok(analyzer.analyze(fragments, size))
}

/// Analyze several pages with default options, keeping page order.
pub fn analyze_pages(pages: Vec<PageInput>) -> MultiPageDocument {
    StructureAnalyzer::new().analyze_pages(pages)
}

/// Analyze a page given as JSON (`{"size": {...}, "fragments": [...]}`).
///
/// # Example
///
/// ```
/// use unocr::analyze_json;
///
/// let json = r#"{
///     "size": {"width": 800.0, "height": 600.0},
///     "fragments": [
///         {"id": "a", "text": "hello", "confidence": 0.9,
///          "boundingBox": {"x": 0.1, "y": 0.5, "width": 0.2, "height": 0.02}}
///     ]
/// }"#;
///
/// let doc = analyze_json(json)?;
/// assert_eq!(doc.paragraphs[0].text, "hello");
/// # Ok::<(), unocr::Error>(())
/// ```
pub fn analyze_json(json: &str) -> Result<StructuredDocument> {
    let page: PageInput = render::from_json(json)?;
    Ok(analyze(page.fragments, page.size))
}

/// Analyze a page and render the result as JSON.
pub fn to_json(fragments: Vec<TextFragment>, size: PageSize, format: JsonFormat) -> Result<String> {
    let doc = analyze(fragments, size);
    render::to_json(&doc, format)
}
