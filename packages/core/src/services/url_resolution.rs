//! Lazy URL Resolution
//!
//! A node's URL is computed on first request and cached for the lifetime of
//! the node instance:
//!
//! - **Content**: delegated to the request's `UrlProvider`
//! - **Media**: read from the file property, decoded according to the editor
//!   that stored it
//!
//! No lock guards the computation. Two callers racing on a fresh node may
//! both resolve, but only the first write to the `OnceLock` is kept and every
//! caller returns that value. The result is a pure function of immutable
//! node state, so the redundant work is value-equal.

use crate::config::UnknownEditorPolicy;
use crate::models::{ContentNode, ImageCropperValue, ItemType, PropertyEditorKind};
use crate::services::{ContentError, ContentResult, RequestContext};

impl ContentNode {
    /// Resolve and cache this node's URL
    ///
    /// # Errors
    ///
    /// - `NoActiveContext` / `NoUrlProvider` for a content node when `request`
    ///   is `None` or carries no provider
    /// - `UnsupportedItemType` for items that are neither content nor media
    /// - `UnsupportedMediaEditor` when the file editor is unknown and the
    ///   configured policy is `Fault`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use content_tree_core::models::{ContentNode, ContentType, ItemType};
    /// use content_tree_core::services::RequestContext;
    /// use std::sync::Arc;
    ///
    /// let page = Arc::new(ContentType::new("page", ItemType::Content));
    /// let node = ContentNode::builder(1063, "Blog", page).build()?;
    ///
    /// assert!(node.url(None).unwrap_err().is_precondition());
    ///
    /// let request = RequestContext::with_url_provider(Arc::new(|_: i32| "/blog/".to_string()));
    /// assert_eq!(node.url(Some(&request))?, "/blog/");
    /// // Cached: no context needed any more
    /// assert_eq!(node.url(None)?, "/blog/");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn url(&self, request: Option<&RequestContext>) -> ContentResult<&str> {
        if let Some(url) = self.url.get() {
            return Ok(url.as_str());
        }

        let resolved = match self.item_type() {
            ItemType::Content => self.content_url(request)?,
            ItemType::Media => self.media_url()?,
            item_type @ (ItemType::Unknown | ItemType::Member | ItemType::Element) => {
                return Err(ContentError::unsupported_item_type(self.id, item_type));
            }
        };

        tracing::debug!("Resolved URL for node {}: {}", self.id, resolved);

        // A racing caller may have won; its value is the one kept
        Ok(self.url.get_or_init(|| resolved).as_str())
    }

    fn content_url(&self, request: Option<&RequestContext>) -> ContentResult<String> {
        let request = request.ok_or_else(|| ContentError::no_active_context(self.id))?;
        let provider = request
            .url_provider()
            .ok_or_else(|| ContentError::no_url_provider(self.id))?;

        Ok(provider.url(self.id))
    }

    fn media_url(&self) -> ContentResult<String> {
        let property = match self.property(&self.config.media_file_alias) {
            Some(property) if property.has_value() => property,
            // A media item without a file is valid
            _ => return Ok(String::new()),
        };

        match property.editor() {
            PropertyEditorKind::UploadField => Ok(property.value_string()),
            PropertyEditorKind::ImageCropper => Ok(property
                .value_as::<ImageCropperValue>()
                .map(|crop| crop.src)
                .unwrap_or_else(|| property.value_string())),
            editor @ PropertyEditorKind::Other(_) => match self.config.unknown_media_editor {
                UnknownEditorPolicy::Empty => {
                    tracing::warn!(
                        "Media node {} stores its file with unsupported editor '{}', using empty URL",
                        self.id,
                        editor
                    );
                    Ok(String::new())
                }
                UnknownEditorPolicy::Fault => Err(ContentError::unsupported_media_editor(
                    self.id,
                    editor.clone(),
                )),
            },
        }
    }
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "url_resolution_test.rs"]
mod url_resolution_test;
