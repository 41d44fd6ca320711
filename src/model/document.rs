//! Document-level types.

use super::{
    Column, Element, ElementKind, ElementRef, Heading, Link, List, Paragraph, Table, TextFragment,
};
use serde::{Deserialize, Serialize};

/// Separator placed between pages by [`MultiPageDocument::plain_text`].
pub const DEFAULT_PAGE_SEPARATOR: &str = "\n\n";

/// Size of the source page image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl PageSize {
    /// Create a new page size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// The reconstructed structure of a single page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    /// Size of the source page
    pub size: PageSize,

    /// Every input fragment, in input order
    pub text_fragments: Vec<TextFragment>,

    /// Headings, top to bottom
    pub headings: Vec<Heading>,

    /// Paragraphs formed from unclaimed fragments
    pub paragraphs: Vec<Paragraph>,

    /// Tables, top to bottom
    pub tables: Vec<Table>,

    /// Links (may point at fragments used elsewhere)
    pub links: Vec<Link>,

    /// Lists, top to bottom
    pub lists: Vec<List>,

    /// Detected columns, left to right
    pub columns: Vec<Column>,

    /// Reading order over headings, paragraphs, tables and lists
    #[serde(default)]
    pub reading_order: Vec<ElementRef>,
}

impl StructuredDocument {
    /// Create an empty document for a page of the given size.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Resolve an element reference.
    pub fn element(&self, element_ref: ElementRef) -> Option<Element<'_>> {
        let index = element_ref.index;
        match element_ref.kind {
            ElementKind::Heading => self.headings.get(index).map(Element::Heading),
            ElementKind::Paragraph => self.paragraphs.get(index).map(Element::Paragraph),
            ElementKind::Table => self.tables.get(index).map(Element::Table),
            ElementKind::List => self.lists.get(index).map(Element::List),
        }
    }

    /// Elements in reading order.
    pub fn elements(&self) -> Vec<Element<'_>> {
        self.reading_order
            .iter()
            .filter_map(|r| self.element(*r))
            .collect()
    }

    /// Look up a fragment by id.
    pub fn fragment(&self, id: &str) -> Option<&TextFragment> {
        self.text_fragments.iter().find(|f| f.id == id)
    }

    /// Check if the page produced no structural elements.
    pub fn is_empty(&self) -> bool {
        self.reading_order.is_empty()
    }

    /// Get the number of structural elements.
    pub fn element_count(&self) -> usize {
        self.reading_order.len()
    }

    /// Get plain text content of the page in reading order.
    pub fn plain_text(&self) -> String {
        self.elements()
            .iter()
            .map(|e| e.text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// An ordered collection of analyzed pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPageDocument {
    /// Pages in input order
    pub pages: Vec<StructuredDocument>,
}

impl MultiPageDocument {
    /// Create a document from pages.
    pub fn new(pages: Vec<StructuredDocument>) -> Self {
        Self { pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn page(&self, page_num: u32) -> Option<&StructuredDocument> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Headings of every page, in page order.
    pub fn all_headings(&self) -> Vec<&Heading> {
        self.pages.iter().flat_map(|p| p.headings.iter()).collect()
    }

    /// Tables of every page, in page order.
    pub fn all_tables(&self) -> Vec<&Table> {
        self.pages.iter().flat_map(|p| p.tables.iter()).collect()
    }

    /// Links of every page, in page order.
    pub fn all_links(&self) -> Vec<&Link> {
        self.pages.iter().flat_map(|p| p.links.iter()).collect()
    }

    /// Lists of every page, in page order.
    pub fn all_lists(&self) -> Vec<&List> {
        self.pages.iter().flat_map(|p| p.lists.iter()).collect()
    }

    /// Join the text of every page with the given separator.
    pub fn text_with_separator(&self, separator: &str) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.text_with_separator(DEFAULT_PAGE_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Paragraph};

    fn page_with_paragraph(text: &str) -> StructuredDocument {
        let fragment = TextFragment::new("p", text, BoundingBox::new(0.1, 0.5, 0.5, 0.02), 0.9);
        let mut page = StructuredDocument::new(PageSize::new(1240.0, 1754.0));
        page.paragraphs
            .push(Paragraph::from_fragments(&[&fragment]).unwrap());
        page.reading_order
            .push(ElementRef::new(ElementKind::Paragraph, 0));
        page.text_fragments.push(fragment);
        page
    }

    #[test]
    fn test_document_new() {
        let doc = StructuredDocument::new(PageSize::new(100.0, 200.0));
        assert!(doc.is_empty());
        assert!(!doc.size.is_landscape());
        assert!(doc.elements().is_empty());
    }

    #[test]
    fn test_elements_resolve() {
        let doc = page_with_paragraph("Hello");
        let elements = doc.elements();
        assert_eq!(elements.len(), 1);
        assert!(elements[0].is_paragraph());
        assert_eq!(doc.plain_text(), "Hello");
        assert!(doc.fragment("p").is_some());
        assert!(doc.element(ElementRef::new(ElementKind::Table, 0)).is_none());
    }

    #[test]
    fn test_multi_page_text() {
        let doc = MultiPageDocument::new(vec![
            page_with_paragraph("One"),
            page_with_paragraph("Two"),
        ]);

        assert_eq!(doc.page_count(), 2);
        assert!(doc.page(0).is_none());
        assert_eq!(doc.page(2).map(|p| p.plain_text()), Some("Two".to_string()));
        assert_eq!(doc.plain_text(), "One\n\nTwo");
        assert_eq!(doc.text_with_separator("\n---\n"), "One\n---\nTwo");
    }
}
