//! List types.

use super::{BoundingBox, FragmentId, TextFragment};
use serde::{Deserialize, Serialize};

/// Kind of list, derived from the marker family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// Bullet markers (•, -, *, ...)
    Unordered,
    /// Numbered, alphabetic or roman numeral markers
    Ordered,
    /// Checkbox markers ([ ], [x], ☐, ☑)
    Checkbox,
}

/// A list of contiguous items sharing a marker family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Marker family
    #[serde(rename = "type")]
    pub list_type: ListType,

    /// Items, top to bottom
    pub items: Vec<ListItem>,

    /// Union of the item boxes
    pub bounding_box: BoundingBox,
}

impl List {
    /// Build a list from its items.
    ///
    /// Returns `None` when there are no items.
    pub fn from_items(list_type: ListType, items: Vec<ListItem>) -> Option<Self> {
        let bounding_box = BoundingBox::union_all(items.iter().map(|i| &i.bounding_box))?;
        Some(Self {
            list_type,
            items,
            bounding_box,
        })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get plain text representation, one item per line.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} {}", item.marker, item.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Item text with the marker stripped
    pub text: String,

    /// The marker as it appeared in the source
    pub marker: String,

    /// Nesting level (always 0; no indentation hierarchy is inferred)
    pub level: u8,

    /// Checkbox state, for checkbox items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    /// Item box
    pub bounding_box: BoundingBox,

    /// Backing fragments
    pub fragment_ids: Vec<FragmentId>,
}

impl ListItem {
    /// Create an item from a fragment whose marker has been split off.
    pub fn from_fragment(
        fragment: &TextFragment,
        marker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            marker: marker.into(),
            level: 0,
            checked: None,
            bounding_box: fragment.bounding_box,
            fragment_ids: vec![fragment.id.clone()],
        }
    }

    /// Set the checkbox state and return self.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }
}
