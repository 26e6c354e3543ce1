//! Published Content Tree Core
//!
//! This crate models nodes of a published content tree (documents and
//! media items) and the two behaviors layered over that data:
//!
//! - Lazy, cached resolution of a node's canonical URL
//! - Ancestor-chain fallback when looking up a property by alias
//!
//! # Modules
//!
//! - [`models`] - Immutable node data, content types and properties
//! - [`services`] - URL resolution, property fallback, request context
//! - [`config`] - Resolution settings shared by a content snapshot
//!
//! Loading content, routing and rendering are left to the host: it builds
//! nodes with [`NodeBuilder`] and supplies a [`UrlProvider`] per request.

pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{ContentConfig, UnknownEditorPolicy};
pub use models::*;
pub use services::*;
