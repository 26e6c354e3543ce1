//! Request-Scoped Resolution Context
//!
//! The routing subsystem is external: it plugs in through [`UrlProvider`].
//! The caller establishes a [`RequestContext`] for the request it is serving
//! and passes it explicitly to `ContentNode::url`; this crate never creates
//! one or looks one up from process-wide state.

use std::fmt;
use std::sync::Arc;

/// Produces the canonical URL of a content (non-media) node
pub trait UrlProvider: Send + Sync {
    fn url(&self, content_id: i32) -> String;
}

impl<F> UrlProvider for F
where
    F: Fn(i32) -> String + Send + Sync,
{
    fn url(&self, content_id: i32) -> String {
        self(content_id)
    }
}

/// Environment of the request being served
#[derive(Clone, Default)]
pub struct RequestContext {
    url_provider: Option<Arc<dyn UrlProvider>>,
}

impl RequestContext {
    /// A context with no URL provider registered
    pub fn new() -> Self {
        Self::default()
    }

    /// # Examples
    ///
    /// ```rust
    /// use content_tree_core::services::RequestContext;
    /// use std::sync::Arc;
    ///
    /// let request = RequestContext::with_url_provider(Arc::new(|id: i32| format!("/node/{}", id)));
    /// assert_eq!(request.url_provider().unwrap().url(42), "/node/42");
    /// ```
    pub fn with_url_provider(provider: Arc<dyn UrlProvider>) -> Self {
        Self {
            url_provider: Some(provider),
        }
    }

    pub fn url_provider(&self) -> Option<&dyn UrlProvider> {
        self.url_provider.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("url_provider", &self.url_provider.is_some())
            .finish()
    }
}
