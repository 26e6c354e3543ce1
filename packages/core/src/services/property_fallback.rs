//! Ancestor-Chain Property Fallback
//!
//! Resolves a property by alias, optionally walking up the parent links
//! until some node carries a meaningful value for it.

use crate::models::{ContentNode, Property};
use std::iter;
use std::sync::Arc;

impl ContentNode {
    /// Find the best property for `alias`
    ///
    /// Without `recurse` this is exactly [`ContentNode::property`]. With it,
    /// the node and then each ancestor is searched. The first property that
    /// has a value wins. Failing that, the first property found at all is
    /// returned, which is the one closest to this node, even if it is empty.
    /// `None` means no node on the chain defines the alias.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use content_tree_core::models::{ContentNode, ContentType, ItemType};
    /// use serde_json::json;
    /// use std::sync::Arc;
    ///
    /// let page = Arc::new(ContentType::new("page", ItemType::Content).with_property_type("theme", "text"));
    /// let root = ContentNode::builder(1, "Home", Arc::clone(&page))
    ///     .with_property("theme", json!("dark"))
    ///     .with_child(ContentNode::builder(2, "Blog", page).with_property("theme", json!("")))
    ///     .build()?;
    ///
    /// let blog = &root.children()[0];
    /// assert_eq!(blog.resolve_property("theme", false).unwrap().value(), &json!(""));
    /// assert_eq!(blog.resolve_property("theme", true).unwrap().value(), &json!("dark"));
    /// # Ok::<(), content_tree_core::models::ValidationError>(())
    /// ```
    pub fn resolve_property(&self, alias: &str, recurse: bool) -> Option<Arc<Property>> {
        let own = self.property(alias).cloned();
        if !recurse {
            return own;
        }

        let chain = iter::once(own).chain(
            self.ancestors()
                .map(|ancestor| ancestor.property(alias).cloned()),
        );

        let mut first_present: Option<Arc<Property>> = None;
        for property in chain.flatten() {
            if property.has_value() {
                return Some(property);
            }
            if first_present.is_none() {
                first_present = Some(property);
            }
        }

        if first_present.is_some() {
            tracing::debug!(
                "No valued '{}' on node {} or its ancestors, using nearest empty property",
                alias,
                self.id
            );
        }

        first_present
    }
}

#[cfg(test)]
#[path = "property_fallback_test.rs"]
mod property_fallback_test;
