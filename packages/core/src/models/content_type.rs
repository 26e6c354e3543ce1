//! Content Types
//!
//! A content type names the kind of item a node is and declares the
//! property types its nodes may carry.

use crate::models::{ItemType, PropertyEditorKind, PropertyType};
use serde::{Deserialize, Serialize};

/// Published content type shared by all nodes of the same kind
///
/// # Examples
///
/// ```rust
/// use content_tree_core::models::{ContentType, ItemType, PropertyEditorKind};
///
/// let image = ContentType::new("image", ItemType::Media)
///     .with_property_type("mediaFile", "image-cropper")
///     .with_property_type("altText", "text");
///
/// let file = image.property_type("mediaFile").unwrap();
/// assert_eq!(file.editor, PropertyEditorKind::ImageCropper);
/// assert!(image.property_type("caption").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub alias: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
}

impl ContentType {
    pub fn new(alias: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            alias: alias.into(),
            item_type,
            property_types: Vec::new(),
        }
    }

    /// Add a property type, replacing any existing one with the same alias
    pub fn with_property_type(
        mut self,
        alias: impl Into<String>,
        editor: impl Into<PropertyEditorKind>,
    ) -> Self {
        let property_type = PropertyType::new(alias, editor);
        self.property_types
            .retain(|existing| existing.alias != property_type.alias);
        self.property_types.push(property_type);
        self
    }

    pub fn property_type(&self, alias: &str) -> Option<&PropertyType> {
        self.property_types.iter().find(|pt| pt.alias == alias)
    }
}
