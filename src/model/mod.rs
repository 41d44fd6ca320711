//! Document model types for reconstructed page structure.
//!
//! Fragments come in from the recognition engine; everything else in this
//! module is derived from them once per page and never updated.

mod column;
mod document;
mod element;
mod fragment;
mod geometry;
mod link;
mod list;
mod paragraph;
mod table;

pub use column::{column_index_for, Column};
pub use document::{MultiPageDocument, PageSize, StructuredDocument, DEFAULT_PAGE_SEPARATOR};
pub use element::{Element, ElementKind, ElementRef};
pub use fragment::{FragmentId, TextFragment};
pub use geometry::{BoundingBox, EDGE_EPSILON};
pub use link::{Link, LinkType};
pub use list::{List, ListItem, ListType};
pub use paragraph::{Heading, Paragraph};
pub use table::{Table, TableCell, TableRow};
