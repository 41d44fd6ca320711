//! Recognized text fragments.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// Identifier of a text fragment, unique within a page.
pub type FragmentId = String;

/// A single recognized span of text with its position and confidence.
///
/// Fragments are produced by the recognition engine and never modified by
/// the analysis; structural elements refer back to them by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFragment {
    /// Unique identifier
    pub id: FragmentId,

    /// Recognized text
    pub text: String,

    /// Position in normalized page coordinates
    pub bounding_box: BoundingBox,

    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(
        id: impl Into<FragmentId>,
        text: impl Into<String>,
        bounding_box: BoundingBox,
        confidence: f32,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            bounding_box,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Height of the fragment's box.
    pub fn height(&self) -> f32 {
        self.bounding_box.height
    }

    /// Check if the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
