//! CMS image references
//!
//! An image in a document is an opaque asset reference plus optional crop and
//! hotspot metadata chosen by the editor. Turning it into a URL is the job of
//! the image URL resolver in the infrastructure layer.

use serde::{Deserialize, Serialize};

/// Reference to an image asset as stored in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Asset document id, e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`
    pub asset_ref: String,
    pub crop: Option<ImageCrop>,
    pub hotspot: Option<ImageHotspot>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl ImageRef {
    #[cfg(test)]
    pub fn new(asset_ref: impl Into<String>) -> Self {
        Self {
            asset_ref: asset_ref.into(),
            crop: None,
            hotspot: None,
            alt: None,
            caption: None,
        }
    }

    #[cfg(test)]
    pub fn with_crop(mut self, crop: ImageCrop) -> Self {
        self.crop = Some(crop);
        self
    }

    #[cfg(test)]
    pub fn with_hotspot(mut self, hotspot: ImageHotspot) -> Self {
        self.hotspot = Some(hotspot);
        self
    }

    #[cfg(test)]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Two references point at the same asset regardless of crop/hotspot
    pub fn same_asset(&self, other: &ImageRef) -> bool {
        self.asset_ref == other.asset_ref
    }
}

/// Fractions trimmed from each edge (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageCrop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Focal area as fractions of the image; `x`/`y` is the center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageHotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
