//! Headings and paragraphs.

use super::{BoundingBox, FragmentId, TextFragment};
use serde::{Deserialize, Serialize};

/// A heading classified from an oversized fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// Heading text
    pub text: String,

    /// Heading level (1 = largest)
    pub level: u8,

    /// Union of the backing fragment boxes
    pub bounding_box: BoundingBox,

    /// Backing fragments
    pub fragment_ids: Vec<FragmentId>,
}

impl Heading {
    /// Create a heading backed by a single fragment.
    pub fn from_fragment(fragment: &TextFragment, level: u8) -> Self {
        Self {
            text: fragment.text.trim().to_string(),
            level,
            bounding_box: fragment.bounding_box,
            fragment_ids: vec![fragment.id.clone()],
        }
    }
}

/// A run of adjacent fragments read as one block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Space-joined fragment text in run order
    pub text: String,

    /// Union of the backing fragment boxes
    pub bounding_box: BoundingBox,

    /// Backing fragments in run order
    pub fragment_ids: Vec<FragmentId>,
}

impl Paragraph {
    /// Build a paragraph from an ordered run of fragments.
    ///
    /// Returns `None` for an empty run.
    pub fn from_fragments(fragments: &[&TextFragment]) -> Option<Self> {
        let bounding_box = BoundingBox::union_all(fragments.iter().map(|f| &f.bounding_box))?;

        let text = fragments
            .iter()
            .map(|f| f.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            text,
            bounding_box,
            fragment_ids: fragments.iter().map(|f| f.id.clone()).collect(),
        })
    }

    /// Number of fragments in the run.
    pub fn fragment_count(&self) -> usize {
        self.fragment_ids.len()
    }
}
