//! Tests for lazy URL resolution
//!
//! Tests cover:
//! - Content URLs via the request's URL provider, and the precondition faults
//! - Media URLs for upload field, image cropper and unknown editors
//! - Caching: at most one provider call per node, even under contention

#[cfg(test)]
mod tests {
    use crate::config::{ContentConfig, UnknownEditorPolicy};
    use crate::models::{ContentNode, ContentType, ItemType};
    use crate::services::{ContentError, RequestContext, UrlProvider};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// URL provider that counts how often it is asked
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl UrlProvider for CountingProvider {
        fn url(&self, content_id: i32) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("/content/{}/", content_id)
        }
    }

    fn page_node(id: i32) -> Arc<ContentNode> {
        let page = Arc::new(ContentType::new("page", ItemType::Content));
        ContentNode::builder(id, "Page", page).build().unwrap()
    }

    fn media_node(editor: &str, file: Option<Value>) -> Arc<ContentNode> {
        media_node_with_config(editor, file, ContentConfig::default())
    }

    fn media_node_with_config(
        editor: &str,
        file: Option<Value>,
        config: ContentConfig,
    ) -> Arc<ContentNode> {
        let alias = config.media_file_alias.clone();
        let image = Arc::new(ContentType::new("image", ItemType::Media).with_property_type(&alias, editor));
        let mut builder = ContentNode::builder(2000, "Photo", image).with_config(Arc::new(config));
        if let Some(value) = file {
            builder = builder.with_property(alias, value);
        }
        builder.build().unwrap()
    }

    // ========================================================================
    // Content URL Tests
    // ========================================================================

    #[test]
    fn test_content_url_from_provider() {
        let provider = Arc::new(CountingProvider::default());
        let request = RequestContext::with_url_provider(provider.clone());
        let node = page_node(1063);

        assert_eq!(node.url(Some(&request)).unwrap(), "/content/1063/");
        assert_eq!(node.cached_url(), Some("/content/1063/"));
    }

    #[test]
    fn test_content_url_resolved_once() {
        let provider = Arc::new(CountingProvider::default());
        let request = RequestContext::with_url_provider(provider.clone());
        let node = page_node(5);

        let first = node.url(Some(&request)).unwrap().to_string();
        let second = node.url(Some(&request)).unwrap().to_string();

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_content_url_without_context_faults() {
        let node = page_node(1);
        let err = node.url(None).unwrap_err();

        assert_eq!(err, ContentError::NoActiveContext { node_id: 1 });
        assert!(err.is_precondition());
        assert!(node.cached_url().is_none());
    }

    #[test]
    fn test_content_url_without_provider_faults() {
        let node = page_node(1);
        let request = RequestContext::new();

        assert_eq!(
            node.url(Some(&request)).unwrap_err(),
            ContentError::NoUrlProvider { node_id: 1 }
        );
        assert!(node.cached_url().is_none());
    }

    #[test]
    fn test_failed_resolution_is_retried_once_context_exists() {
        let node = page_node(9);
        assert!(node.url(None).is_err());

        let request = RequestContext::with_url_provider(Arc::new(|id: i32| format!("/p{}", id)));
        assert_eq!(node.url(Some(&request)).unwrap(), "/p9");
    }

    #[test]
    fn test_concurrent_callers_observe_same_url() {
        let provider = Arc::new(CountingProvider::default());
        let request = RequestContext::with_url_provider(provider.clone());
        let node = page_node(77);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let node = Arc::clone(&node);
                let request = request.clone();
                thread::spawn(move || node.url(Some(&request)).unwrap().to_string())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "/content/77/");
        }

        let calls = provider.calls.load(Ordering::SeqCst);
        assert!((1..=8).contains(&calls));

        // Settled: no further provider calls
        node.url(Some(&request)).unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), calls);
    }

    // ========================================================================
    // Media URL Tests
    // ========================================================================

    #[test]
    fn test_media_without_file_property_is_empty() {
        let node = media_node("upload-field", None);

        assert_eq!(node.url(None).unwrap(), "");
        assert_eq!(node.cached_url(), Some(""));
    }

    #[test]
    fn test_media_with_empty_file_is_empty() {
        let node = media_node("upload-field", Some(json!(null)));
        assert_eq!(node.url(None).unwrap(), "");

        let node = media_node("upload-field", Some(json!("")));
        assert_eq!(node.url(None).unwrap(), "");
    }

    #[test]
    fn test_media_with_whitespace_file_is_empty() {
        let node = media_node("upload-field", Some(json!("  \t")));

        assert_eq!(node.url(None).unwrap(), "");
        assert_eq!(node.cached_url(), Some(""));
    }

    #[test]
    fn test_media_upload_field_uses_value_verbatim() {
        let node = media_node("upload-field", Some(json!("/media/1001/report.pdf")));
        assert_eq!(node.url(None).unwrap(), "/media/1001/report.pdf");
    }

    #[test]
    fn test_media_image_cropper_uses_src() {
        let node = media_node(
            "image-cropper",
            Some(json!({
                "src": "/media/a.jpg",
                "focalPoint": {"left": 0.5, "top": 0.5},
                "crops": [{"alias": "thumb", "width": 100, "height": 100}]
            })),
        );

        assert_eq!(node.url(None).unwrap(), "/media/a.jpg");
    }

    #[test]
    fn test_media_image_cropper_falls_back_to_string_form() {
        let node = media_node("image-cropper", Some(json!("/media/legacy.jpg")));
        assert_eq!(node.url(None).unwrap(), "/media/legacy.jpg");

        // Object without src is not the crop shape
        let node = media_node("image-cropper", Some(json!({"path": "/media/x.png"})));
        assert_eq!(node.url(None).unwrap(), r#"{"path":"/media/x.png"}"#);
    }

    #[test]
    fn test_media_image_cropper_with_empty_src_is_empty() {
        let node = media_node("image-cropper", Some(json!({"src": "", "crops": []})));
        assert_eq!(node.url(None).unwrap(), "");
    }

    #[test]
    fn test_media_unknown_editor_empty_policy() {
        let node = media_node("media-picker", Some(json!("/media/1/x.png")));

        assert_eq!(node.url(None).unwrap(), "");
        assert_eq!(node.cached_url(), Some(""));
    }

    #[test]
    fn test_media_unknown_editor_fault_policy() {
        let config = ContentConfig {
            unknown_media_editor: UnknownEditorPolicy::Fault,
            ..Default::default()
        };
        let node = media_node_with_config("media-picker", Some(json!("/media/1/x.png")), config);

        let err = node.url(None).unwrap_err();
        assert!(matches!(err, ContentError::UnsupportedMediaEditor { node_id: 2000, .. }));
        assert!(!err.is_precondition());
        assert!(node.cached_url().is_none());
    }

    #[test]
    fn test_media_uses_configured_file_alias() {
        let config = ContentConfig {
            media_file_alias: "asset".to_string(),
            ..Default::default()
        };
        let node = media_node_with_config("upload-field", Some(json!("/media/asset.svg")), config);

        assert_eq!(node.url(None).unwrap(), "/media/asset.svg");
    }

    #[test]
    fn test_media_ignores_request_context() {
        let provider = Arc::new(CountingProvider::default());
        let request = RequestContext::with_url_provider(provider.clone());
        let node = media_node("upload-field", Some(json!("/media/f.txt")));

        assert_eq!(node.url(Some(&request)).unwrap(), "/media/f.txt");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    // ========================================================================
    // Unsupported Item Type Tests
    // ========================================================================

    #[test]
    fn test_member_element_and_unknown_items_fault() {
        for item_type in [ItemType::Member, ItemType::Element, ItemType::Unknown] {
            let ct = Arc::new(ContentType::new("other", item_type));
            let node = ContentNode::builder(3, "Other", ct).build().unwrap();
            let request = RequestContext::with_url_provider(Arc::new(CountingProvider::default()));

            assert_eq!(
                node.url(Some(&request)).unwrap_err(),
                ContentError::UnsupportedItemType {
                    node_id: 3,
                    item_type
                }
            );
            assert!(node.cached_url().is_none());
        }
    }
}
