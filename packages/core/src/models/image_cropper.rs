//! Image Cropper Value Shape
//!
//! The structured value the image cropper editor stores for a media file:
//! the source path plus an optional focal point and named crops.

use serde::{Deserialize, Serialize};

/// Decoded image cropper value
///
/// `src` is required; a JSON object without it does not have the crop shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCropperValue {
    pub src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_point: Option<FocalPoint>,

    #[serde(default)]
    pub crops: Vec<ImageCrop>,
}

impl ImageCropperValue {
    /// Find a crop by alias
    pub fn crop(&self, alias: &str) -> Option<&ImageCrop> {
        self.crops.iter().find(|crop| crop.alias == alias)
    }
}

/// Focal point as fractions of width and height (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalPoint {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCrop {
    pub alias: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CropCoordinates>,
}

/// Crop box edges as fractions of the source image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropCoordinates {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}
