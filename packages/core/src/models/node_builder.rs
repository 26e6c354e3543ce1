//! Provider-Side Node Construction
//!
//! `NodeBuilder` is what a content provider uses to turn loaded content into
//! an immutable, linked `ContentNode` tree. The whole subtree is validated
//! before any node is allocated, so construction itself cannot fail halfway.

use crate::config::ContentConfig;
use crate::models::{ContentNode, ContentType, CultureInfo, Property, ValidationError};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

/// Builder for a `ContentNode` and its descendants
///
/// # Examples
///
/// ```rust
/// use content_tree_core::models::{ContentNode, ContentType, ItemType};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let image = Arc::new(
///     ContentType::new("image", ItemType::Media).with_property_type("mediaFile", "upload-field"),
/// );
///
/// let node = ContentNode::builder(1100, "Logo", image)
///     .with_writer(7, "editor")
///     .with_property("mediaFile", json!("/media/1100/logo.png"))
///     .build()?;
///
/// assert_eq!(node.writer_name(), "editor");
/// assert!(node.property("mediaFile").unwrap().has_value());
/// # Ok::<(), content_tree_core::models::ValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    id: i32,
    key: Uuid,
    name: String,
    url_segment: Option<String>,
    template_id: Option<i32>,
    creator: (i32, String),
    writer: (i32, String),
    create_date: DateTime<Utc>,
    update_date: DateTime<Utc>,
    is_draft: bool,
    cultures: Vec<CultureInfo>,
    content_type: Arc<ContentType>,
    properties: Vec<(String, Value)>,
    children: Vec<NodeBuilder>,
    config: Option<Arc<ContentConfig>>,
}

impl NodeBuilder {
    pub fn new(id: i32, name: impl Into<String>, content_type: Arc<ContentType>) -> Self {
        let now = Utc::now();

        Self {
            id,
            key: Uuid::new_v4(),
            name: name.into(),
            url_segment: None,
            template_id: None,
            creator: (0, String::new()),
            writer: (0, String::new()),
            create_date: now,
            update_date: now,
            is_draft: false,
            cultures: Vec::new(),
            content_type,
            properties: Vec::new(),
            children: Vec::new(),
            config: None,
        }
    }

    pub fn with_key(mut self, key: Uuid) -> Self {
        self.key = key;
        self
    }

    /// Override the segment derived from the name
    pub fn with_url_segment(mut self, segment: impl Into<String>) -> Self {
        self.url_segment = Some(segment.into());
        self
    }

    pub fn with_template(mut self, template_id: i32) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn with_creator(mut self, id: i32, name: impl Into<String>) -> Self {
        self.creator = (id, name.into());
        self
    }

    pub fn with_writer(mut self, id: i32, name: impl Into<String>) -> Self {
        self.writer = (id, name.into());
        self
    }

    pub fn with_dates(mut self, created: DateTime<Utc>, updated: DateTime<Utc>) -> Self {
        self.create_date = created;
        self.update_date = updated;
        self
    }

    pub fn with_draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    pub fn with_culture(mut self, culture: CultureInfo) -> Self {
        self.cultures.push(culture);
        self
    }

    /// Set a decoded property value; the alias must exist on the content type
    pub fn with_property(mut self, alias: impl Into<String>, value: Value) -> Self {
        self.properties.push((alias.into(), value));
        self
    }

    pub fn with_child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Configuration for this node; descendants without their own inherit it
    pub fn with_config(mut self, config: Arc<ContentConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate and construct the tree rooted at this builder
    ///
    /// Both passes use explicit work stacks, so arbitrarily deep trees are
    /// safe to build.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any node in the subtree:
    /// - has an empty name
    /// - reuses an id already present in the subtree
    /// - sets a property its content type does not define, or sets one twice
    /// - carries an invalid `ContentConfig`
    pub fn build(self) -> Result<Arc<ContentNode>, ValidationError> {
        if let Err(error) = self.validate() {
            // Detached builders drop one at a time
            drop(Placed::flatten(self));
            return Err(error);
        }

        let (root, descendants) = Placed::flatten(self);

        // Slot 0 holds the root's children, slot i + 1 those of descendants[i].
        // Pre-order puts every child after its parent, so walking backwards
        // finishes all children before their parent is allocated.
        let mut slots: Vec<Vec<Arc<ContentNode>>> = vec![Vec::new(); descendants.len() + 1];
        for (index, placed) in descendants.into_iter().enumerate().rev() {
            let parent_slot = placed.parent_slot;
            let children = std::mem::take(&mut slots[index + 1]);
            slots[parent_slot].push(placed.into_node(children));
        }

        let children = std::mem::take(&mut slots[0]);
        Ok(root.into_node(children))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen_ids = HashSet::new();
        let mut pending = vec![self];

        while let Some(builder) = pending.pop() {
            builder.validate_own(&mut seen_ids)?;
            pending.extend(builder.children.iter().rev());
        }

        Ok(())
    }

    fn validate_own(&self, seen_ids: &mut HashSet<i32>) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }

        if !seen_ids.insert(self.id) {
            return Err(ValidationError::DuplicateId(self.id));
        }

        if let Some(config) = &self.config {
            config.validate().map_err(ValidationError::InvalidConfig)?;
        }

        let mut aliases = HashSet::new();
        for (alias, _) in &self.properties {
            if self.content_type.property_type(alias).is_none() {
                return Err(ValidationError::UnknownPropertyType {
                    node_id: self.id,
                    alias: alias.clone(),
                });
            }
            if !aliases.insert(alias.as_str()) {
                return Err(ValidationError::DuplicateProperty {
                    node_id: self.id,
                    alias: alias.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A builder with its tree position resolved, children detached
struct Placed {
    builder: NodeBuilder,
    parent_slot: usize,
    sort_order: i32,
    level: i32,
    path: String,
    config: Arc<ContentConfig>,
}

impl Placed {
    /// Resolve positions top-down, returning the root and its descendants in
    /// pre-order. `parent_slot` is 0 for the root, `i + 1` for descendants[i].
    fn flatten(mut root: NodeBuilder) -> (Placed, Vec<Placed>) {
        let children = std::mem::take(&mut root.children);
        let config = root
            .config
            .clone()
            .unwrap_or_else(|| Arc::new(ContentConfig::default()));
        let root = Placed {
            path: root.id.to_string(),
            builder: root,
            parent_slot: 0,
            sort_order: 0,
            level: 1,
            config,
        };

        let mut descendants: Vec<Placed> = Vec::new();
        let mut pending: Vec<(NodeBuilder, usize, i32)> = children
            .into_iter()
            .enumerate()
            .map(|(index, child)| (child, 0, index as i32))
            .collect();

        while let Some((mut builder, parent_slot, sort_order)) = pending.pop() {
            let children = std::mem::take(&mut builder.children);
            let parent = match parent_slot {
                0 => &root,
                slot => &descendants[slot - 1],
            };
            let placed = Placed {
                path: format!("{},{}", parent.path, builder.id),
                level: parent.level + 1,
                config: builder
                    .config
                    .clone()
                    .unwrap_or_else(|| Arc::clone(&parent.config)),
                parent_slot,
                sort_order,
                builder,
            };

            let slot = descendants.len() + 1;
            descendants.push(placed);
            pending.extend(
                children
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| (child, slot, index as i32)),
            );
        }

        (root, descendants)
    }

    /// Allocate the node and point each child's parent link at it
    fn into_node(self, mut children: Vec<Arc<ContentNode>>) -> Arc<ContentNode> {
        let Placed {
            builder,
            sort_order,
            level,
            path,
            config,
            ..
        } = self;
        let NodeBuilder {
            id,
            key,
            name,
            url_segment,
            template_id,
            creator,
            writer,
            create_date,
            update_date,
            is_draft,
            cultures,
            content_type,
            properties,
            children: _,
            config: _,
        } = builder;

        let url_segment = url_segment.unwrap_or_else(|| segment_from_name(&name));

        // Aliases were checked in validate()
        let properties = properties
            .into_iter()
            .filter_map(|(alias, value)| {
                let property_type = content_type.property_type(&alias)?.clone();
                Some(Arc::new(Property::new(property_type, value)))
            })
            .collect();

        let cultures: HashMap<String, CultureInfo> = cultures
            .into_iter()
            .map(|info| (info.culture.to_lowercase(), info))
            .collect();

        // Siblings arrive in reverse pre-order
        children.sort_by_key(|child| child.sort_order);

        let node = Arc::new(ContentNode {
            id,
            key,
            name,
            url_segment,
            sort_order,
            level,
            path,
            template_id,
            creator_id: creator.0,
            creator_name: creator.1,
            create_date,
            writer_id: writer.0,
            writer_name: writer.1,
            update_date,
            is_draft,
            cultures,
            content_type,
            properties,
            parent: OnceLock::new(),
            children,
            config,
            url: OnceLock::new(),
        });

        for child in &node.children {
            let _ = child.parent.set(Arc::downgrade(&node));
        }

        node
    }
}

/// Lowercased name with whitespace runs replaced by `-`
fn segment_from_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
