//! Node Properties
//!
//! A property is a named, already-decoded value attached to a node. Values
//! arrive from the property value decoder as `serde_json::Value`; this layer
//! only answers whether a value is meaningful and, for media files, whether
//! it has the image-crop shape.

use crate::models::ImageCropperValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const UPLOAD_FIELD_ALIAS: &str = "upload-field";
const IMAGE_CROPPER_ALIAS: &str = "image-cropper";

/// Editor that produced a property's stored value
///
/// Parsed from the editor alias on the property type. Any alias other than
/// the two file editors is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyEditorKind {
    /// Plain file upload; value is the file path
    UploadField,
    /// Image cropper; value is an `ImageCropperValue`
    ImageCropper,
    /// Any other editor, identified by its alias
    Other(String),
}

impl PropertyEditorKind {
    pub fn alias(&self) -> &str {
        match self {
            Self::UploadField => UPLOAD_FIELD_ALIAS,
            Self::ImageCropper => IMAGE_CROPPER_ALIAS,
            Self::Other(alias) => alias,
        }
    }
}

impl From<&str> for PropertyEditorKind {
    fn from(alias: &str) -> Self {
        match alias {
            UPLOAD_FIELD_ALIAS => Self::UploadField,
            IMAGE_CROPPER_ALIAS => Self::ImageCropper,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PropertyEditorKind {
    fn from(alias: String) -> Self {
        Self::from(alias.as_str())
    }
}

impl From<PropertyEditorKind> for String {
    fn from(kind: PropertyEditorKind) -> Self {
        kind.alias().to_string()
    }
}

impl fmt::Display for PropertyEditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// Definition of a property on a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    pub alias: String,
    pub editor: PropertyEditorKind,
}

impl PropertyType {
    pub fn new(alias: impl Into<String>, editor: impl Into<PropertyEditorKind>) -> Self {
        Self {
            alias: alias.into(),
            editor: editor.into(),
        }
    }
}

/// A decoded property value on a single node
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    property_type: PropertyType,
    value: Value,
}

impl Property {
    pub fn new(property_type: PropertyType, value: Value) -> Self {
        Self {
            property_type,
            value,
        }
    }

    pub fn alias(&self) -> &str {
        &self.property_type.alias
    }

    pub fn editor(&self) -> &PropertyEditorKind {
        &self.property_type.editor
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Deserialize the value into a typed shape, `None` if it does not fit
    pub fn value_as<T: DeserializeOwned>(&self) -> Option<T> {
        T::deserialize(&self.value).ok()
    }

    /// Generic string form of the value
    ///
    /// Strings are returned verbatim; any other value is rendered as
    /// compact JSON.
    pub fn value_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the value is meaningful for its editor
    ///
    /// Null, blank strings, and empty arrays or objects never count. An
    /// image crop additionally needs a non-blank `src`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use content_tree_core::models::{Property, PropertyType};
    /// use serde_json::json;
    ///
    /// let title = PropertyType::new("title", "text");
    /// assert!(Property::new(title.clone(), json!("Welcome")).has_value());
    /// assert!(!Property::new(title.clone(), json!("  ")).has_value());
    /// assert!(!Property::new(title, json!(null)).has_value());
    /// ```
    pub fn has_value(&self) -> bool {
        let present = match &self.value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        };

        if !present {
            return false;
        }

        match self.editor() {
            PropertyEditorKind::ImageCropper if self.value.is_object() => self
                .value_as::<ImageCropperValue>()
                .map_or(true, |crop| !crop.src.trim().is_empty()),
            _ => true,
        }
    }
}
