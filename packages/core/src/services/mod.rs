//! Resolution Services
//!
//! The two behaviors layered over the otherwise inert node data:
//!
//! - `url_resolution` - Lazy, write-once URL of a content or media node
//! - `property_fallback` - Property lookup with ancestor-chain fallback
//! - `RequestContext` / `UrlProvider` - Caller-supplied routing environment
//!
//! Both are implemented as inherent methods on `ContentNode`
//! (`ContentNode::url` and `ContentNode::resolve_property`).

pub mod error;
mod property_fallback;
pub mod request_context;
mod url_resolution;

pub use error::{ContentError, ContentResult};
pub use request_context::{RequestContext, UrlProvider};
