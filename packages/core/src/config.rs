//! Content Resolution Configuration
//!
//! Settings shared by every node a provider builds. They are resolved once
//! when the content snapshot is loaded and handed to nodes through an
//! `Arc<ContentConfig>`, so request handling never reads process-wide state.

use serde::{Deserialize, Serialize};

/// Conventional alias of the property holding a media item's primary file
pub const DEFAULT_MEDIA_FILE_ALIAS: &str = "mediaFile";

/// What a media URL resolves to when its file property was written by an
/// editor that is neither the upload field nor the image cropper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownEditorPolicy {
    /// Cache and return the empty string, logging a warning
    #[default]
    Empty,
    /// Fail with `ContentError::UnsupportedMediaEditor`; nothing is cached
    Fault,
}

/// Configuration for URL and property resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Alias of the media property that references the stored file
    pub media_file_alias: String,

    /// Behavior for media files written by an unrecognized editor
    pub unknown_media_editor: UnknownEditorPolicy,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            media_file_alias: DEFAULT_MEDIA_FILE_ALIAS.to_string(),
            unknown_media_editor: UnknownEditorPolicy::default(),
        }
    }
}

impl ContentConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults
    ///
    /// # Examples
    ///
    /// ```rust
    /// use content_tree_core::config::{ContentConfig, UnknownEditorPolicy};
    ///
    /// let config = ContentConfig::from_json(r#"{"unknownMediaEditor": "fault"}"#)?;
    /// assert_eq!(config.media_file_alias, "mediaFile");
    /// assert_eq!(config.unknown_media_editor, UnknownEditorPolicy::Fault);
    /// # Ok::<(), String>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid content config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.media_file_alias.trim().is_empty() {
            return Err("media_file_alias cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContentConfig::default();
        assert_eq!(config.media_file_alias, "mediaFile");
        assert_eq!(config.unknown_media_editor, UnknownEditorPolicy::Empty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_blank_alias() {
        let config = ContentConfig {
            media_file_alias: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = ContentConfig::from_json(r#"{"mediaFileAlias": "file"}"#).unwrap();
        assert_eq!(config.media_file_alias, "file");
        assert_eq!(config.unknown_media_editor, UnknownEditorPolicy::Empty);
    }

    #[test]
    fn test_config_from_json_rejects_unknown_fields() {
        let result = ContentConfig::from_json(r#"{"mediaAlias": "file"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_json_rejects_empty_alias() {
        let result = ContentConfig::from_json(r#"{"mediaFileAlias": ""}"#);
        assert!(result.is_err());
    }
}
