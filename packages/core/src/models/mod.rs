//! Data Models
//!
//! This module contains the data structures of the published content tree:
//!
//! - `ContentNode` - Immutable document or media node with tree links
//! - `NodeBuilder` - Provider-side construction of linked node trees
//! - `ContentType` / `PropertyType` - Item kind and property definitions
//! - `Property` - Decoded property value with `has_value()` semantics
//! - `ImageCropperValue` - Structured value stored by the image cropper

mod content_type;
mod image_cropper;
mod node;
mod node_builder;
mod property;

pub use content_type::ContentType;
pub use image_cropper::{CropCoordinates, FocalPoint, ImageCrop, ImageCropperValue};
pub use node::{Ancestors, ContentNode, CultureInfo, ItemType, ValidationError};
pub use node_builder::NodeBuilder;
pub use property::{Property, PropertyEditorKind, PropertyType};
