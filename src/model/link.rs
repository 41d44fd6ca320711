//! Link types.

use super::{BoundingBox, FragmentId};
use serde::{Deserialize, Serialize};

/// Kind of detected link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Web address
    Url,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// File URL or absolute path
    File,
    /// Match from a custom pattern
    Unknown,
}

/// A link found inside a fragment's text.
///
/// The box is the containing fragment's box; span-level geometry is not
/// reconstructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// The matched text
    pub text: String,

    /// Kind of link
    #[serde(rename = "type")]
    pub link_type: LinkType,

    /// Canonical form (mailto:, tel:, https:// prefixed where applicable)
    pub url: String,

    /// Box of the containing fragment
    pub bounding_box: BoundingBox,

    /// Containing fragment
    pub fragment_id: FragmentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_serialization_keys() {
        let link = Link {
            text: "a@b.com".to_string(),
            link_type: LinkType::Email,
            url: "mailto:a@b.com".to_string(),
            bounding_box: BoundingBox::new(0.1, 0.1, 0.3, 0.02),
            fragment_id: "f1".to_string(),
        };

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "email");
        assert_eq!(value["url"], "mailto:a@b.com");
        assert!(value.get("boundingBox").is_some());
        assert_eq!(value["fragmentId"], "f1");
    }
}
