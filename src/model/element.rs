//! Typed elements in reading order.

use super::{BoundingBox, Heading, List, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Kind of a structural element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A heading
    Heading,
    /// A paragraph
    Paragraph,
    /// A table
    Table,
    /// A list
    List,
}

/// Position of an element in the document's typed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Which collection the element lives in
    pub kind: ElementKind,
    /// Index into that collection
    pub index: usize,
}

impl ElementRef {
    /// Create a new element reference.
    pub fn new(kind: ElementKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// A structural element borrowed from a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    /// A heading
    Heading(&'a Heading),
    /// A paragraph
    Paragraph(&'a Paragraph),
    /// A table
    Table(&'a Table),
    /// A list
    List(&'a List),
}

impl<'a> Element<'a> {
    /// Kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Heading(_) => ElementKind::Heading,
            Element::Paragraph(_) => ElementKind::Paragraph,
            Element::Table(_) => ElementKind::Table,
            Element::List(_) => ElementKind::List,
        }
    }

    /// Bounding box of the element.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Element::Heading(h) => h.bounding_box,
            Element::Paragraph(p) => p.bounding_box,
            Element::Table(t) => t.bounding_box,
            Element::List(l) => l.bounding_box,
        }
    }

    /// Plain text of the element.
    pub fn text(&self) -> String {
        match self {
            Element::Heading(h) => h.text.clone(),
            Element::Paragraph(p) => p.text.clone(),
            Element::Table(t) => t.plain_text(),
            Element::List(l) => l.plain_text(),
        }
    }

    /// Check if this element is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Element::Heading(_))
    }

    /// Check if this element is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Element::Paragraph(_))
    }

    /// Check if this element is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Element::Table(_))
    }

    /// Check if this element is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Element::List(_))
    }
}
