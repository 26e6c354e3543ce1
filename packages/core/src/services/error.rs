//! Resolution Error Types
//!
//! Faults raised while resolving a node's URL. They describe a misconfigured
//! host environment or an item this layer does not understand, so they are
//! never retried. Missing properties, missing ancestors and media without a
//! file are ordinary `None` / empty results, not errors.

use crate::models::{ItemType, PropertyEditorKind};
use thiserror::Error;

/// URL resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Content URL requested without a request context
    #[error("Cannot resolve a URL for content node {node_id}: no active request context")]
    NoActiveContext { node_id: i32 },

    /// Request context exists but carries no URL provider
    #[error("Cannot resolve a URL for content node {node_id}: no URL provider configured")]
    NoUrlProvider { node_id: i32 },

    /// Item type has no URL resolution strategy
    #[error("Cannot resolve a URL for node {node_id}: unsupported item type '{item_type}'")]
    UnsupportedItemType { node_id: i32, item_type: ItemType },

    /// Media file written by an editor without a URL mapping
    #[error("Cannot resolve a URL for media node {node_id}: unsupported file editor '{editor}'")]
    UnsupportedMediaEditor {
        node_id: i32,
        editor: PropertyEditorKind,
    },
}

impl ContentError {
    pub fn no_active_context(node_id: i32) -> Self {
        Self::NoActiveContext { node_id }
    }

    pub fn no_url_provider(node_id: i32) -> Self {
        Self::NoUrlProvider { node_id }
    }

    pub fn unsupported_item_type(node_id: i32, item_type: ItemType) -> Self {
        Self::UnsupportedItemType { node_id, item_type }
    }

    pub fn unsupported_media_editor(node_id: i32, editor: PropertyEditorKind) -> Self {
        Self::UnsupportedMediaEditor { node_id, editor }
    }

    /// Whether the caller failed to establish the resolution environment
    ///
    /// The remaining variants mean the node's kind is not supported.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoActiveContext { .. } | Self::NoUrlProvider { .. }
        )
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
