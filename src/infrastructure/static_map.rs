//! Mapbox Static Images engine
//!
//! Renders a map to a single image URL instead of a live canvas. Used for the
//! map page preview, where a server has no browser to host the real widget.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::application::ports::outbound::{
    MapEngine, MapInstance, MapOptions, MapWidgetError, MarkerSpec,
};
use crate::domain::value_objects::GeoPoint;

const API_BASE: &str = "https://api.mapbox.com/styles/v1";
const STYLE_PREFIX: &str = "mapbox://styles/";

/// Longest request URL the Static Images API accepts
pub const MAX_URL_LENGTH: usize = 8192;

/// Pin colour per attraction category
fn marker_color(category: Option<&str>) -> &'static str {
    match category {
        Some("waterfall") => "06b6d4",
        Some("hotspring") | Some("spa") => "ec4899",
        Some("glacier") => "3b82f6",
        Some("museum") => "f59e0b",
        Some("mountain") => "22c55e",
        _ => "6b7280",
    }
}

#[derive(Debug, Clone)]
pub struct StaticMapEngine {
    width: u32,
    height: u32,
}

impl StaticMapEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(1, 1280),
            height: height.clamp(1, 1280),
        }
    }
}

impl Default for StaticMapEngine {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl MapEngine for StaticMapEngine {
    type Instance = StaticMap;

    fn create(&self, _container: &str, options: &MapOptions) -> Result<StaticMap, MapWidgetError> {
        let style = options
            .style
            .strip_prefix(STYLE_PREFIX)
            .filter(|s| s.split('/').count() == 2)
            .ok_or_else(|| {
                MapWidgetError::Initialization(format!("unsupported style '{}'", options.style))
            })?;

        Ok(StaticMap {
            style: style.to_string(),
            access_token: options.access_token.clone(),
            center: options.center,
            zoom: options.zoom,
            width: self.width,
            height: self.height,
            markers: Vec::new(),
            removed: false,
        })
    }
}

/// One static map image under construction
#[derive(Debug, Clone)]
pub struct StaticMap {
    style: String,
    access_token: String,
    center: GeoPoint,
    zoom: f64,
    width: u32,
    height: u32,
    markers: Vec<(GeoPoint, &'static str)>,
    removed: bool,
}

impl StaticMap {
    /// Image URL for the current markers, or `None` once removed
    pub fn url(&self) -> Option<String> {
        if self.removed {
            return None;
        }

        let overlay = self
            .markers
            .iter()
            .map(|(p, color)| format!("pin-s+{}({:.5},{:.5})", color, p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(",");
        let overlay = if overlay.is_empty() {
            String::new()
        } else {
            format!("{}/", overlay)
        };

        Some(format!(
            "{}/{}/static/{}{:.4},{:.4},{}/{}x{}?access_token={}",
            API_BASE,
            self.style,
            overlay,
            self.center.lng,
            self.center.lat,
            self.zoom,
            self.width,
            self.height,
            utf8_percent_encode(&self.access_token, NON_ALPHANUMERIC)
        ))
    }
}

impl MapInstance for StaticMap {
    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), MapWidgetError> {
        if self.removed {
            return Err(MapWidgetError::Engine("map was removed".to_string()));
        }
        self.markers
            .push((marker.position, marker_color(marker.category.as_deref())));
        Ok(())
    }

    fn remove(&mut self) {
        self.markers.clear();
        self.removed = true;
    }
}
