//! Image CDN URLs for CMS image references
//!
//! Asset references look like `image-{assetId}-{W}x{H}-{ext}`. The resolver
//! parses them once and hands out a builder; the builder is pure and always
//! emits query parameters in the same order so URLs are stable across renders.

use std::fmt::Write as _;

use crate::domain::value_objects::{ImageCrop, ImageHotspot, ImageRef};

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Asset reference could not be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("malformed image reference '{reference}': {reason}")]
pub struct MalformedReferenceError {
    pub reference: String,
    pub reason: &'static str,
}

/// How the CDN fits the image into the requested box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Fill the box exactly, cutting around the focal point
    Crop,
    /// Fit inside the box without upscaling
    Max,
}

impl Fit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fit::Crop => "crop",
            Fit::Max => "max",
        }
    }
}

/// Parsed `image-{id}-{W}x{H}-{ext}` reference
#[derive(Debug, Clone, PartialEq)]
struct AssetId {
    id: String,
    width: u32,
    height: u32,
    format: String,
}

impl AssetId {
    fn parse(reference: &str) -> Result<Self, MalformedReferenceError> {
        let malformed = |reason| MalformedReferenceError {
            reference: reference.to_string(),
            reason,
        };

        let rest = reference
            .strip_prefix("image-")
            .ok_or_else(|| malformed("missing image- prefix"))?;

        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next().filter(|s| !s.is_empty());
        let dimensions = parts.next();
        let id = parts.next().filter(|s| !s.is_empty());

        let (Some(id), Some(dimensions), Some(format)) = (id, dimensions, format) else {
            return Err(malformed("expected image-<id>-<W>x<H>-<ext>"));
        };
        if !format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(malformed("invalid format"));
        }

        let (width, height) = dimensions
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)))
            .filter(|(w, h)| *w > 0 && *h > 0)
            .ok_or_else(|| malformed("invalid dimensions"))?;

        Ok(Self {
            id: id.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }
}

/// Pixel rectangle of the source image to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

/// Turns image references into CDN URL builders for one project/dataset
#[derive(Debug, Clone)]
pub struct ImageUrlResolver {
    project_id: String,
    dataset: String,
}

impl ImageUrlResolver {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Builder for the reference, or `None` when absent or unparseable
    pub fn resolve(&self, image: Option<&ImageRef>) -> Option<ImageUrlBuilder> {
        let image = image?;
        match AssetId::parse(&image.asset_ref) {
            Ok(asset) => Some(ImageUrlBuilder {
                base: format!("{}/{}/{}", CDN_BASE, self.project_id, self.dataset),
                asset,
                crop: image.crop,
                hotspot: image.hotspot,
                width: None,
                height: None,
                fit: None,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Image reference not resolvable");
                None
            }
        }
    }
}

/// Pending image URL; finish with [`ImageUrlBuilder::to_url`]
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    base: String,
    asset: AssetId,
    crop: Option<ImageCrop>,
    hotspot: Option<ImageHotspot>,
    width: Option<u32>,
    height: Option<u32>,
    fit: Option<Fit>,
}

impl ImageUrlBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Crop rectangle in source pixels, if the crop trims anything
    fn rect(&self) -> Option<Rect> {
        let crop = self.crop?;
        let (w, h) = (self.asset.width as f64, self.asset.height as f64);

        let left = (crop.left.clamp(0.0, 1.0) * w).round();
        let top = (crop.top.clamp(0.0, 1.0) * h).round();
        let right = w - (crop.right.clamp(0.0, 1.0) * w).round();
        let bottom = h - (crop.bottom.clamp(0.0, 1.0) * h).round();

        let rect = Rect {
            left: left as u32,
            top: top as u32,
            width: (right - left).max(1.0) as u32,
            height: (bottom - top).max(1.0) as u32,
        };
        let full = Rect {
            left: 0,
            top: 0,
            width: self.asset.width,
            height: self.asset.height,
        };
        (rect != full).then_some(rect)
    }

    /// Hotspot center relative to the visible rectangle
    fn focal_point(&self, rect: Option<Rect>) -> Option<(f64, f64)> {
        let hotspot = self.hotspot?;
        let (x, y) = (
            hotspot.x * self.asset.width as f64,
            hotspot.y * self.asset.height as f64,
        );
        let (fx, fy) = match rect {
            Some(r) => (
                (x - r.left as f64) / r.width as f64,
                (y - r.top as f64) / r.height as f64,
            ),
            None => (hotspot.x, hotspot.y),
        };
        Some((round3(fx.clamp(0.0, 1.0)), round3(fy.clamp(0.0, 1.0))))
    }

    /// Fully-qualified CDN URL
    pub fn to_url(&self) -> String {
        let asset = &self.asset;
        let mut url = format!(
            "{}/{}-{}x{}.{}",
            self.base, asset.id, asset.width, asset.height, asset.format
        );

        let rect = self.rect();
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(r) = rect {
            params.push(("rect", format!("{},{},{},{}", r.left, r.top, r.width, r.height)));
        }
        if let Some(w) = self.width {
            params.push(("w", w.to_string()));
        }
        if let Some(h) = self.height {
            params.push(("h", h.to_string()));
        }
        if let Some(fit) = self.fit {
            params.push(("fit", fit.as_str().to_string()));
        }

        // Focal point only matters when the CDN has to cut into a fixed box
        let boxed = self.width.is_some() && self.height.is_some();
        if boxed && matches!(self.fit, None | Some(Fit::Crop)) {
            if let Some((fx, fy)) = self.focal_point(rect) {
                params.push(("crop", "focalpoint".to_string()));
                params.push(("fp-x", fx.to_string()));
                params.push(("fp-y", fy.to_string()));
            }
        }

        for (i, (key, value)) in params.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            let _ = write!(url, "{}{}={}", separator, key, value);
        }
        url
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
