//! Published Content Node
//!
//! This module defines `ContentNode`, one entry of the published content
//! tree: either a document or a media item.
//!
//! # Architecture
//!
//! - **Immutable Data**: Identity, audit, tree and culture fields are
//!   populated once by the content provider (see [`NodeBuilder`]) and never
//!   change for the lifetime of the node instance
//! - **Weak Parent Links**: Children are owned through `Arc`, the parent is
//!   a `Weak` back-reference, so a tree is dropped as soon as the provider
//!   releases its roots. The builder links parents bottom-up, so the link
//!   sits in a `OnceLock` filled once during `build()`
//! - **Write-Once URL**: The only mutable state after `build()` is a
//!   `OnceLock` holding the resolved URL (see `services::url_resolution`)
//! - **Depth Independent**: Building, walking and dropping a tree use
//!   explicit work stacks, never call-stack recursion
//!
//! # Examples
//!
//! ```rust
//! use content_tree_core::models::{ContentNode, ContentType, ItemType};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let page = Arc::new(
//!     ContentType::new("page", ItemType::Content).with_property_type("title", "text"),
//! );
//!
//! let home = ContentNode::builder(1, "Home", Arc::clone(&page))
//!     .with_property("title", json!("Welcome"))
//!     .with_child(ContentNode::builder(2, "About Us", page))
//!     .build()?;
//!
//! let about = &home.children()[0];
//! assert_eq!(about.parent().unwrap().id(), 1);
//! assert_eq!(about.path(), "1,2");
//! assert_eq!(about.url_segment(), "about-us");
//! # Ok::<(), content_tree_core::models::ValidationError>(())
//! ```

use crate::config::ContentConfig;
use crate::models::{ContentType, NodeBuilder, Property};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised while building a node tree
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate node id in tree: {0}")]
    DuplicateId(i32),

    #[error("Node {node_id} sets property '{alias}' which its content type does not define")]
    UnknownPropertyType { node_id: i32, alias: String },

    #[error("Node {node_id} sets property '{alias}' more than once")]
    DuplicateProperty { node_id: i32, alias: String },

    #[error("Invalid content configuration: {0}")]
    InvalidConfig(String),
}

/// Kind of published item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Unknown,
    /// Document routed by the URL provider
    Content,
    /// Media asset whose URL comes from its file property
    Media,
    Member,
    /// Nested block data; never routed on its own
    Element,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Content => write!(f, "content"),
            Self::Media => write!(f, "media"),
            Self::Member => write!(f, "member"),
            Self::Element => write!(f, "element"),
        }
    }
}

/// Per-culture name, segment and publish date of a variant node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureInfo {
    pub culture: String,
    pub name: String,
    pub url_segment: String,
    pub date: DateTime<Utc>,
}

/// A node of the published content tree
///
/// Instances are only created through [`ContentNode::builder`] and are
/// shared as `Arc<ContentNode>`.
pub struct ContentNode {
    pub(crate) id: i32,
    pub(crate) key: Uuid,
    pub(crate) name: String,
    pub(crate) url_segment: String,
    pub(crate) sort_order: i32,
    pub(crate) level: i32,
    pub(crate) path: String,
    pub(crate) template_id: Option<i32>,
    pub(crate) creator_id: i32,
    pub(crate) creator_name: String,
    pub(crate) create_date: DateTime<Utc>,
    pub(crate) writer_id: i32,
    pub(crate) writer_name: String,
    pub(crate) update_date: DateTime<Utc>,
    pub(crate) is_draft: bool,
    /// Keyed by lowercase culture code
    pub(crate) cultures: HashMap<String, CultureInfo>,
    pub(crate) content_type: Arc<ContentType>,
    pub(crate) properties: Vec<Arc<Property>>,
    /// Set once by the builder after the parent is allocated
    pub(crate) parent: OnceLock<Weak<ContentNode>>,
    pub(crate) children: Vec<Arc<ContentNode>>,
    pub(crate) config: Arc<ContentConfig>,
    pub(crate) url: OnceLock<String>,
}

impl ContentNode {
    /// Start building a node (and optionally its subtree)
    pub fn builder(
        id: i32,
        name: impl Into<String>,
        content_type: Arc<ContentType>,
    ) -> NodeBuilder {
        NodeBuilder::new(id, name, content_type)
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url_segment(&self) -> &str {
        &self.url_segment
    }

    /// Position among siblings, starting at 0
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Depth in the tree; roots are at level 1
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Comma-separated ids from the root down to this node
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn template_id(&self) -> Option<i32> {
        self.template_id
    }

    pub fn creator_id(&self) -> i32 {
        self.creator_id
    }

    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    pub fn create_date(&self) -> DateTime<Utc> {
        self.create_date
    }

    pub fn writer_id(&self) -> i32 {
        self.writer_id
    }

    pub fn writer_name(&self) -> &str {
        &self.writer_name
    }

    pub fn update_date(&self) -> DateTime<Utc> {
        self.update_date
    }

    pub fn is_draft(&self) -> bool {
        self.is_draft
    }

    pub fn item_type(&self) -> ItemType {
        self.content_type.item_type
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Culture variant info, matched case-insensitively on the culture code
    pub fn culture(&self, culture: &str) -> Option<&CultureInfo> {
        self.cultures.get(&culture.to_lowercase())
    }

    /// Culture info that also answers for invariant nodes
    ///
    /// A node published without cultures answers every culture with its own
    /// name, url segment and update date under the invariant code `""`. A
    /// variant node behaves exactly like [`ContentNode::culture`].
    pub fn culture_or_invariant(&self, culture: &str) -> Option<CultureInfo> {
        if self.cultures.is_empty() {
            return Some(CultureInfo {
                culture: String::new(),
                name: self.name.clone(),
                url_segment: self.url_segment.clone(),
                date: self.update_date,
            });
        }

        self.culture(culture).cloned()
    }

    pub fn cultures(&self) -> &HashMap<String, CultureInfo> {
        &self.cultures
    }

    /// Whether the node was published without a parent
    pub fn is_root(&self) -> bool {
        self.level == 1
    }

    /// The parent node, `None` for roots or if the parent has been dropped
    pub fn parent(&self) -> Option<Arc<ContentNode>> {
        self.parent.get().and_then(Weak::upgrade)
    }

    pub fn children(&self) -> &[Arc<ContentNode>] {
        &self.children
    }

    /// Iterate parent, grandparent, ... up to the root
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    pub fn properties(&self) -> &[Arc<Property>] {
        &self.properties
    }

    /// The property defined directly on this node for `alias`
    pub fn property(&self, alias: &str) -> Option<&Arc<Property>> {
        self.properties.iter().find(|p| p.alias() == alias)
    }

    /// The URL if it has already been resolved, without resolving it
    pub fn cached_url(&self) -> Option<&str> {
        self.url.get().map(String::as_str)
    }
}

impl Drop for ContentNode {
    fn drop(&mut self) {
        // Unlink uniquely owned descendants here so a deep chain is released
        // in a loop instead of one nested drop per level
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(mut child) = Arc::try_unwrap(child) {
                pending.append(&mut child.children);
            }
        }
    }
}

impl fmt::Debug for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("item_type", &self.item_type())
            .field("path", &self.path)
            .field("children", &self.children.len())
            .field("url", &self.url.get())
            .finish()
    }
}

impl fmt::Display for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Content Id: {}, Name: {}", self.id, self.name)
    }
}

/// Iterator over a node's ancestors, nearest first
pub struct Ancestors {
    next: Option<Arc<ContentNode>>,
}

impl Iterator for Ancestors {
    type Item = Arc<ContentNode>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
